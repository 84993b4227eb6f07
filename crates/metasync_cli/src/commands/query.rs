//! Query command implementation.

use super::{read_document, DocumentError};
use metasync_client::{HttpClient, MetadataClient};
use metasync_protocol::Value;
use std::path::Path;
use tracing::info;

/// Runs the JSON array of queries at `file` as one bulk request.
pub fn run<C: HttpClient>(
    client: &MetadataClient<C>,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let queries = match read_document(file)? {
        Value::Array(queries) => queries,
        _ => {
            return Err(DocumentError::Shape {
                path: file.to_path_buf(),
                expected: "a JSON array of queries",
            }
            .into())
        }
    };
    info!("Running {} queries against {}", queries.len(), client.config().endpoint);

    client.query(queries)?;
    println!("✓ Queries executed");
    Ok(())
}
