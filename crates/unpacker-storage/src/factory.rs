use crate::{RemoteStorage, StorageResult, WebDavStorage};
use unpacker_core::Config;
use std::sync::Arc;

/// Create the remote storage backend from configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn RemoteStorage>> {
    let storage = WebDavStorage::new(
        config.nextcloud_url().to_string(),
        config.credentials(),
        std::time::Duration::from_secs(config.http_timeout_secs()),
    )?;
    Ok(Arc::new(storage))
}
