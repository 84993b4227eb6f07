//! Reset command implementation.

use metasync_client::{HttpClient, MetadataClient};
use tracing::info;

/// Clears all metadata on the engine.
pub fn run<C: HttpClient>(client: &MetadataClient<C>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Clearing metadata at {}", client.config().endpoint);
    client.reset_metadata()?;
    println!("✓ Metadata cleared");
    Ok(())
}
