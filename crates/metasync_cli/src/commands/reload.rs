//! Reload command implementation.

use metasync_client::{HttpClient, MetadataClient};
use tracing::info;

/// Makes the engine recompute its metadata.
pub fn run<C: HttpClient>(client: &MetadataClient<C>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reloading metadata at {}", client.config().endpoint);
    client.reload_metadata()?;
    println!("✓ Metadata reloaded");
    Ok(())
}
