//! WebDAV storage backend (`remote.php/dav`).

use crate::traits::{RemoteStorage, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use unpacker_core::AppApiCredentials;

/// Characters left unescaped in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Server-absolute DAV path of a user-relative path: `/files/{user}/{path}`.
pub fn dav_files_path(user_id: &str, remote_path: &str) -> String {
    let relative = remote_path.trim_start_matches('/');
    if relative.is_empty() {
        format!("/files/{}", user_id)
    } else {
        format!("/files/{}/{}", user_id, relative)
    }
}

/// Reverse of [`dav_files_path`]; `None` if the path is not inside the user's tree.
fn user_relative(user_id: &str, dav_path: &str) -> Option<String> {
    let prefix = format!("/files/{}", user_id);
    let rest = dav_path.strip_prefix(&prefix)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        None
    }
}

#[derive(Clone)]
pub struct WebDavStorage {
    client: Client,
    base_url: String,
    credentials: AppApiCredentials,
}

impl WebDavStorage {
    /// Create a new WebDAV backend
    ///
    /// # Arguments
    /// * `base_url` - Instance URL without `/index.php` (e.g. "https://cloud.example.com")
    /// * `credentials` - AppAPI identity used to sign each request
    /// * `connect_timeout` - Applied to connection setup only; transfers are unbounded
    pub fn new(
        base_url: String,
        credentials: AppApiCredentials,
        connect_timeout: Duration,
    ) -> StorageResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn dav_url(&self, dav_path: &str) -> String {
        let encoded: Vec<String> = dav_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect();
        format!("{}/remote.php/dav/{}", self.base_url, encoded.join("/"))
    }

    fn signed(&self, request: RequestBuilder, user_id: &str) -> RequestBuilder {
        self.credentials
            .signed_headers(user_id)
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }

    /// MKCOL every folder of `remote_dir` from the root down. Existing folders answer 405.
    async fn ensure_collections(&self, user_id: &str, remote_dir: &str) -> StorageResult<()> {
        let mut current = String::new();
        for segment in remote_dir.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);

            let url = self.dav_url(&dav_files_path(user_id, &current));
            let mkcol = Method::from_bytes(b"MKCOL")
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
            let response = self
                .signed(self.client.request(mkcol, &url), user_id)
                .send()
                .await?;

            let status = response.status();
            if !(status.is_success() || status == StatusCode::METHOD_NOT_ALLOWED) {
                return Err(StorageError::UploadFailed(format!(
                    "MKCOL {} returned {}",
                    current, status
                )));
            }
        }
        Ok(())
    }

    fn parent_dir(remote_path: &str) -> &str {
        match remote_path.trim_end_matches('/').rfind('/') {
            Some(idx) => &remote_path[..idx],
            None => "",
        }
    }

    async fn check_put(response: reqwest::Response, remote_path: &str) -> StorageResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::UploadFailed(format!(
            "PUT {} returned {}: {}",
            remote_path, status, body
        )))
    }
}

#[async_trait]
impl RemoteStorage for WebDavStorage {
    async fn download_to_file(
        &self,
        user_id: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<u64> {
        let start = std::time::Instant::now();
        let url = self.dav_url(&dav_files_path(user_id, remote_path));

        let response = self
            .signed(self.client.get(&url), user_id)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(remote_path.to_string()));
        }
        if !status.is_success() {
            return Err(StorageError::DownloadFailed(format!(
                "GET {} returned {}",
                remote_path, status
            )));
        }

        if let Some(parent) = local_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::File::create(local_path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to create file {}: {}",
                local_path.display(),
                e
            ))
        })?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| StorageError::DownloadFailed(format!("Failed to read chunk: {}", e)))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(
            user = %user_id,
            remote_path = %remote_path,
            local_path = %local_path.display(),
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "WebDAV download successful"
        );

        Ok(written)
    }

    async fn upload_file(
        &self,
        user_id: &str,
        remote_path: &str,
        local_path: &Path,
    ) -> StorageResult<()> {
        let start = std::time::Instant::now();
        self.ensure_collections(user_id, Self::parent_dir(remote_path))
            .await?;

        let file = fs::File::open(local_path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", local_path.display(), e))
        })?;
        let size = file.metadata().await?.len();
        let body = reqwest::Body::wrap_stream(tokio_util::io::ReaderStream::new(file));

        let url = self.dav_url(&dav_files_path(user_id, remote_path));
        let response = self
            .signed(self.client.put(&url), user_id)
            .header(reqwest::header::CONTENT_LENGTH, size)
            .body(body)
            .send()
            .await?;
        Self::check_put(response, remote_path).await?;

        tracing::info!(
            user = %user_id,
            remote_path = %remote_path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "WebDAV upload successful"
        );

        Ok(())
    }

    async fn upload_file_absolute(
        &self,
        user_id: &str,
        dav_path: &str,
        local_path: &Path,
    ) -> StorageResult<()> {
        let relative = user_relative(user_id, dav_path).ok_or_else(|| {
            StorageError::InvalidPath(format!("{} is outside /files/{}", dav_path, user_id))
        })?;
        self.ensure_collections(user_id, Self::parent_dir(&relative))
            .await?;

        let data = fs::read(local_path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read {}: {}", local_path.display(), e))
        })?;
        let size = data.len();

        let url = self.dav_url(dav_path);
        let response = self
            .signed(self.client.put(&url), user_id)
            .body(data)
            .send()
            .await?;
        Self::check_put(response, dav_path).await?;

        tracing::info!(
            user = %user_id,
            dav_path = %dav_path,
            size_bytes = size,
            "WebDAV absolute upload successful"
        );

        Ok(())
    }
}
