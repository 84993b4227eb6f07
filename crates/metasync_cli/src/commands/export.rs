//! Export command implementation.

use metasync_client::{HttpClient, MetadataClient};
use std::fs;
use std::path::Path;
use tracing::info;

/// Exports the engine's metadata as pretty JSON to `output`, or stdout.
pub fn run<C: HttpClient>(
    client: &MetadataClient<C>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Exporting metadata from {}", client.config().endpoint);

    let metadata = client.export_metadata()?;
    let text = serde_json::to_string_pretty(&metadata)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n"))?;
            println!("✓ Metadata exported to {:?}", path);
        }
        None => println!("{text}"),
    }
    Ok(())
}
