//! In-memory fakes for the storage and notification seams.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use unpacker_core::Notifier;
use unpacker_storage::{RemoteStorage, StorageError, StorageResult};

/// Remote storage kept in a map keyed by `(user, user-relative path)`.
///
/// Absolute (fallback) uploads are recorded under the DAV path they were
/// addressed with.
#[derive(Default)]
pub struct InMemoryStorage {
    files: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    absolute_uploads: Mutex<BTreeMap<String, Vec<u8>>>,
    failing_uploads: Mutex<HashSet<String>>,
    fail_absolute: Mutex<bool>,
    fail_downloads: Mutex<bool>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, user_id: &str, path: &str, data: impl Into<Vec<u8>>) {
        self.lock_files()
            .insert((user_id.to_string(), path.to_string()), data.into());
    }

    pub fn get(&self, user_id: &str, path: &str) -> Option<Vec<u8>> {
        self.lock_files()
            .get(&(user_id.to_string(), path.to_string()))
            .cloned()
    }

    /// Every user-relative path stored for `user_id`, sorted.
    pub fn paths(&self, user_id: &str) -> Vec<String> {
        self.lock_files()
            .keys()
            .filter(|(user, _)| user == user_id)
            .map(|(_, path)| path.clone())
            .collect()
    }

    pub fn absolute_paths(&self) -> Vec<String> {
        lock(&self.absolute_uploads).keys().cloned().collect()
    }

    /// Make primary uploads to `path` fail.
    pub fn fail_upload_to(&self, path: &str) {
        lock(&self.failing_uploads).insert(path.to_string());
    }

    pub fn fail_absolute_uploads(&self) {
        *lock(&self.fail_absolute) = true;
    }

    pub fn fail_downloads(&self) {
        *lock(&self.fail_downloads) = true;
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, BTreeMap<(String, String), Vec<u8>>> {
        lock(&self.files)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl RemoteStorage for InMemoryStorage {
    async fn download_to_file(
        &self,
        user_id: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<u64> {
        if *lock(&self.fail_downloads) {
            return Err(StorageError::Transport("connection refused".into()));
        }
        let data = self
            .get(user_id, remote_path)
            .ok_or_else(|| StorageError::NotFound(remote_path.to_string()))?;
        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(local_path, &data).await?;
        Ok(data.len() as u64)
    }

    async fn upload_file(
        &self,
        user_id: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<()> {
        if lock(&self.failing_uploads).contains(remote_path) {
            return Err(StorageError::UploadFailed(format!("{} rejected", remote_path)));
        }
        let data = tokio::fs::read(local_path).await?;
        self.put(user_id, remote_path, data);
        Ok(())
    }

    async fn upload_file_absolute(
        &self,
        _user_id: &str,
        dav_path: &str,
        local_path: &Path,
    ) -> StorageResult<()> {
        if *lock(&self.fail_absolute) {
            return Err(StorageError::UploadFailed(format!("{} rejected", dav_path)));
        }
        let data = tokio::fs::read(local_path).await?;
        lock(&self.absolute_uploads).insert(dav_path.to_string(), data);
        Ok(())
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub user_id: String,
    pub subject: String,
    pub message: String,
}

/// Notifier that keeps every notification it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentNotification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records notifications but reports every delivery as failed.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user_id: &str, subject: &str, message: &str) -> Result<(), String> {
        lock(&self.sent).push(SentNotification {
            user_id: user_id.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        if self.fail {
            Err("notification endpoint unavailable".to_string())
        } else {
            Ok(())
        }
    }
}
