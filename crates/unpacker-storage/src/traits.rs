//! Remote storage abstraction trait

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Transport(err.to_string())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// The user's file storage on the Nextcloud instance.
///
/// Nothing here retries; callers decide what a failure means for them.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Stream a remote file into `local_path`, returning the number of bytes written.
    async fn download_to_file(
        &self,
        user_id: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<u64>;

    /// Upload `local_path` to a user-relative `remote_path`, creating missing
    /// parent folders.
    async fn upload_file(
        &self,
        user_id: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<()>;

    /// Fallback upload addressed by server-absolute DAV path (`/files/{user}/...`).
    async fn upload_file_absolute(
        &self,
        user_id: &str,
        dav_path: &str,
        local_path: &Path,
    ) -> StorageResult<()>;
}
