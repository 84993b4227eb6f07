//! CLI command implementations.

pub mod apply;
pub mod export;
pub mod query;
pub mod reload;
pub mod reset;

use metasync_protocol::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading a local JSON document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// The file holds the wrong kind of JSON value.
    #[error("{path:?}: expected {expected}")]
    Shape {
        /// File path.
        path: PathBuf,
        /// What the file should contain.
        expected: &'static str,
    },
}

/// Reads and parses a JSON document.
pub fn read_document(path: &Path) -> Result<Value, DocumentError> {
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_valid_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"version": 2, "tables": []}}"#).unwrap();
        let value = read_document(file.path()).unwrap();
        assert_eq!(value["version"], serde_json::json!(2));
    }

    #[test]
    fn read_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn read_invalid_document() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "tables: []").unwrap();
        let err = read_document(file.path()).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
    }
}
