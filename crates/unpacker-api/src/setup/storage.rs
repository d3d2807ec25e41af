//! Remote storage and local scratch setup

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use unpacker_core::Config;
use unpacker_storage::{create_storage, RemoteStorage};

pub fn setup_storage(config: &Config) -> Result<Arc<dyn RemoteStorage>> {
    let storage = create_storage(config).context("Failed to create WebDAV storage")?;
    tracing::info!(base_url = %config.nextcloud_url(), "WebDAV storage initialized");
    Ok(storage)
}

/// Remove the scratch root if it exists and create it empty.
pub async fn prepare_scratch_root(path: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => tracing::info!(path = %path.display(), "Removed stale scratch directory"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to clear {}", path.display()));
        }
    }

    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(())
}
