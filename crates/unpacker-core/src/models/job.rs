use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::{DOWNLOAD_SUBDIR, EXTRACTED_SUBDIR};
use crate::models::UiActionFileInfo;
use crate::paths::{file_name, normalize_remote_path};

/// Where extracted members should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Infer the destination from the archive layout.
    Auto,
    /// Always the archive's own folder.
    Parent,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Auto => "auto",
            ExtractionMode::Parent => "parent",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ExtractionMode::Auto),
            "parent" => Ok(ExtractionMode::Parent),
            other => Err(format!("Unknown extraction mode: {}", other)),
        }
    }
}

/// The file a user acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub user_id: String,
    /// Normalized, `/`-rooted path inside the user's storage.
    pub path_in_user_space: String,
    pub display_name: String,
    pub mime_type: String,
}

impl SourceFile {
    pub fn new(user_id: impl Into<String>, path: &str, mime_type: impl Into<String>) -> Self {
        let path_in_user_space = normalize_remote_path(path);
        let display_name = file_name(&path_in_user_space).to_string();
        Self {
            user_id: user_id.into(),
            path_in_user_space,
            display_name,
            mime_type: mime_type.into(),
        }
    }

    /// Build from an action payload. `user_id` is the authenticated user.
    pub fn from_action(info: &UiActionFileInfo, user_id: &str) -> Self {
        let path = format!("{}/{}", info.directory, info.name);
        Self::new(user_id, &path, info.mime.clone())
    }
}

/// One user action: download, extract, upload, notify.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub id: Uuid,
    pub source: SourceFile,
    pub mode: ExtractionMode,
    /// Job-private scratch directory, `<scratch root>/<timestamp>-<uuid>`.
    pub local_scratch_dir: PathBuf,
    pub started_at: DateTime<Utc>,
}

impl ExtractionJob {
    pub fn new(source: SourceFile, mode: ExtractionMode, scratch_root: &Path) -> Self {
        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let token = format!("{}-{}", started_at.format("%Y%m%d%H%M%S"), id.simple());
        Self {
            id,
            source,
            mode,
            local_scratch_dir: scratch_root.join(token),
            started_at,
        }
    }

    /// Local copy of the downloaded archive, `<scratch>/download/<name>`.
    pub fn downloaded_archive_path(&self) -> PathBuf {
        let name = Path::new(&self.source.display_name)
            .file_name()
            .map(|n| n.to_os_string())
            .filter(|n| !n.is_empty() && n != "." && n != "..")
            .unwrap_or_else(|| "archive".into());
        self.local_scratch_dir.join(DOWNLOAD_SUBDIR).join(name)
    }

    /// Directory receiving unpacked members.
    pub fn extraction_dir(&self) -> PathBuf {
        self.local_scratch_dir.join(EXTRACTED_SUBDIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("auto".parse::<ExtractionMode>().unwrap(), ExtractionMode::Auto);
        assert_eq!("PARENT".parse::<ExtractionMode>().unwrap(), ExtractionMode::Parent);
        assert!("here".parse::<ExtractionMode>().is_err());
        assert_eq!(ExtractionMode::Parent.to_string(), "parent");
    }

    #[test]
    fn test_source_file_from_action() {
        let info: UiActionFileInfo = serde_json::from_value(serde_json::json!({
            "fileId": 7,
            "name": "report.zip",
            "directory": "/Documents/",
            "mime": "application/zip"
        }))
        .unwrap();
        let source = SourceFile::from_action(&info, "alice");
        assert_eq!(source.user_id, "alice");
        assert_eq!(source.path_in_user_space, "/Documents/report.zip");
        assert_eq!(source.display_name, "report.zip");
        assert_eq!(source.mime_type, "application/zip");
    }

    #[test]
    fn test_job_scratch_dirs_are_unique() {
        let root = Path::new("/tmp/Extracted");
        let source = SourceFile::new("alice", "/a.zip", "application/zip");
        let first = ExtractionJob::new(source.clone(), ExtractionMode::Auto, root);
        let second = ExtractionJob::new(source, ExtractionMode::Auto, root);
        assert_ne!(first.local_scratch_dir, second.local_scratch_dir);
        assert!(first.local_scratch_dir.starts_with(root));
        assert_eq!(
            first.downloaded_archive_path(),
            first.local_scratch_dir.join("download").join("a.zip")
        );
        assert_eq!(first.extraction_dir(), first.local_scratch_dir.join("extracted"));
    }

    #[test]
    fn test_downloaded_archive_path_fallback_name() {
        let source = SourceFile::new("alice", "/", "");
        let job = ExtractionJob::new(source, ExtractionMode::Parent, Path::new("/tmp/x"));
        assert_eq!(
            job.downloaded_archive_path(),
            job.local_scratch_dir.join("download").join("archive")
        );
    }

    #[test]
    fn test_download_never_shares_a_path_with_the_extraction_dir() {
        let root = Path::new("/tmp/Extracted");
        for name in ["extracted", "download"] {
            let source = SourceFile::new("alice", &format!("/d/{}", name), "application/zip");
            let job = ExtractionJob::new(source, ExtractionMode::Auto, root);
            let archive = job.downloaded_archive_path();
            assert!(!archive.starts_with(job.extraction_dir()));
            assert!(!job.extraction_dir().starts_with(&archive));
        }
    }
}
