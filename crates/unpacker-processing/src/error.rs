use thiserror::Error;
use unpacker_storage::StorageError;

/// Failures inside one extraction job. Only `Download` aborts the job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Download failed: {0}")]
    Download(#[source] StorageError),

    #[error("Unreadable archive: {0}")]
    UnreadableArchive(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Upload failed for {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: StorageError,
    },

    #[error("Cleanup failed: {0}")]
    Cleanup(#[from] std::io::Error),

    #[error("{0} is not inside the scratch directory")]
    PathOutsideScratch(String),
}

impl JobError {
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Download(_) => "download",
            JobError::UnreadableArchive(_) => "unreadable_archive",
            JobError::Extraction(_) => "extraction",
            JobError::Upload { .. } => "upload",
            JobError::Cleanup(_) => "cleanup",
            JobError::PathOutsideScratch(_) => "path_outside_scratch",
        }
    }
}
