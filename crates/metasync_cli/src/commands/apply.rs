//! Apply command implementation.

use super::read_document;
use metasync_client::{HttpClient, MetadataClient};
use std::path::Path;
use tracing::info;

/// Replaces the engine's metadata with the document at `file`.
pub fn run<C: HttpClient>(
    client: &MetadataClient<C>,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = read_document(file)?;
    info!("Applying {:?} to {}", file, client.config().endpoint);

    client.apply_metadata(metadata)?;
    println!("✓ Metadata applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use metasync_testkit::prelude::*;
    use std::fs;

    #[test]
    fn apply_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(&path, serde_json::to_string_pretty(&sample_metadata()).unwrap()).unwrap();

        let client = loopback_cli_client(FakeEngine::new());
        run(&client, &path).unwrap();
        assert_eq!(client.http().server().metadata(), sample_metadata());
    }

    #[test]
    fn apply_error_shows_offending_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(&path, r#"{"version": 2, "tables": {"table": "authors"}}"#).unwrap();

        let client = loopback_cli_client(FakeEngine::new());
        let text = run(&client, &path).unwrap_err().to_string();
        assert!(text.contains("($.args[1].args.tables)\r\noffending object:"));
        assert!(text.contains("\"table\": \"authors\""));
    }

    #[test]
    fn apply_bad_file_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        fs::write(&path, "not json").unwrap();

        let client = loopback_cli_client(FakeEngine::new());
        assert!(run(&client, &path).is_err());
        assert!(client.http().server().requests().is_empty());
    }
}
