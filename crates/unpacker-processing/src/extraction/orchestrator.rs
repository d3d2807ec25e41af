//! Extraction orchestration: download → inspect → extract → upload members → notify.

use anyhow::{Context, Result};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use unpacker_core::models::{DestinationPath, ExtractionJob, ExtractionMode};
use unpacker_core::Notifier;
use unpacker_storage::RemoteStorage;

use crate::archive::{inspect, ArchiveUnpacker, Unpacker};
use crate::destination::{fallback, resolve};
use crate::error::JobError;
use crate::remote_path::{to_dav_path, to_upload_path};

const SUCCESS_MESSAGE: &str = "Extracted file(s) are waiting for you!";
const FAILURE_MESSAGE: &str = "Error information was written to log file";

/// How a job ended. Decides which notification the user gets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// At least one member was uploaded, or the archive was legitimately empty.
    Completed { uploaded: usize, skipped: usize },
    /// The source file could not be fetched; nothing else ran.
    DownloadFailed,
    /// Extraction failed and produced no files.
    NothingExtracted,
    /// Every extracted member failed to upload, fallback included.
    UploadFailed { skipped: usize },
    /// Unexpected error or panic inside the job.
    Failed,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Completed { .. })
    }
}

/// Runs extraction jobs. One instance is shared by every job; jobs keep all of
/// their state in their own scratch directory.
pub struct ExtractionOrchestrator {
    storage: Arc<dyn RemoteStorage>,
    notifier: Arc<dyn Notifier>,
    unpacker: Arc<dyn Unpacker>,
}

impl ExtractionOrchestrator {
    pub fn new(storage: Arc<dyn RemoteStorage>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            storage,
            notifier,
            unpacker: Arc::new(ArchiveUnpacker::new()),
        }
    }

    pub fn with_unpacker(mut self, unpacker: Arc<dyn Unpacker>) -> Self {
        self.unpacker = unpacker;
        self
    }

    /// Run one job to completion. Never fails: every error ends up in the
    /// log and in exactly one notification to the job's user.
    #[tracing::instrument(
        skip(self, job),
        fields(
            job_id = %job.id,
            user = %job.source.user_id,
            source = %job.source.path_in_user_space,
            mode = %job.mode
        )
    )]
    pub async fn run(&self, job: ExtractionJob) -> JobOutcome {
        tracing::info!("Starting extraction job");

        let outcome = match AssertUnwindSafe(self.execute(&job)).catch_unwind().await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::error!(error = ?e, "Extraction job failed");
                JobOutcome::Failed
            }
            Err(_) => {
                tracing::error!("Extraction job panicked");
                JobOutcome::Failed
            }
        };

        self.remove_scratch_dir(&job).await;
        self.send_notification(&job, &outcome).await;

        tracing::info!(outcome = ?outcome, "Extraction job finished");
        outcome
    }

    async fn execute(&self, job: &ExtractionJob) -> Result<JobOutcome> {
        let source = &job.source;
        tokio::fs::create_dir_all(&job.local_scratch_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create scratch directory {}",
                    job.local_scratch_dir.display()
                )
            })?;

        let archive_path = job.downloaded_archive_path();
        tracing::info!(step = "download", local = %archive_path.display(), "Downloading source file");
        match self
            .storage
            .download_to_file(&source.user_id, &source.path_in_user_space, &archive_path)
            .await
        {
            Ok(bytes) => tracing::debug!(bytes, "Source file downloaded"),
            Err(e) => {
                let err = JobError::Download(e);
                tracing::error!(error = %err, kind = err.kind(), "Aborting job");
                return Ok(JobOutcome::DownloadFailed);
            }
        }

        let destination = self.resolve_destination(job, &archive_path).await?;
        tracing::info!(step = "resolve", destination = %destination, "Destination resolved");

        let extraction_dir = job.extraction_dir();
        tokio::fs::create_dir_all(&extraction_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create extraction directory {}",
                    extraction_dir.display()
                )
            })?;

        let extraction_failed = match self.unpacker.extract_all(&archive_path, &extraction_dir).await {
            Ok(count) => {
                tracing::info!(step = "extract", files = count, "Archive extracted");
                false
            }
            Err(e) => {
                tracing::warn!(step = "extract", error = %e, kind = e.kind(), "Extraction failed");
                true
            }
        };

        let members = collect_files(extraction_dir.clone()).await?;
        let mut uploaded = 0;
        let mut skipped = 0;
        for member in &members {
            if self.upload_member(job, member, &extraction_dir, &destination).await {
                uploaded += 1;
            } else {
                skipped += 1;
            }
        }

        if let Err(e) = tokio::fs::remove_file(&archive_path).await {
            let err = JobError::Cleanup(e);
            tracing::warn!(error = %err, path = %archive_path.display(), "Failed to delete downloaded archive");
        }

        let outcome = if members.is_empty() && extraction_failed {
            JobOutcome::NothingExtracted
        } else if uploaded == 0 && skipped > 0 {
            JobOutcome::UploadFailed { skipped }
        } else {
            JobOutcome::Completed { uploaded, skipped }
        };
        Ok(outcome)
    }

    async fn resolve_destination(
        &self,
        job: &ExtractionJob,
        archive_path: &Path,
    ) -> Result<DestinationPath> {
        let source = &job.source;
        if job.mode == ExtractionMode::Parent {
            return Ok(resolve(
                &Default::default(),
                &source.path_in_user_space,
                job.mode,
                &source.user_id,
            ));
        }

        let path = archive_path.to_path_buf();
        let layout = tokio::task::spawn_blocking(move || inspect(&path))
            .await
            .context("Archive inspection task failed")?;

        Ok(match layout {
            Ok(layout) => resolve(&layout, &source.path_in_user_space, job.mode, &source.user_id),
            Err(e) => {
                tracing::warn!(error = %e, kind = e.kind(), "Falling back to the archive's folder");
                fallback(&source.path_in_user_space, &source.user_id)
            }
        })
    }

    /// Upload one member, trying the absolute-path write once if the regular
    /// upload fails. The local copy is removed either way.
    async fn upload_member(
        &self,
        job: &ExtractionJob,
        member: &Path,
        extraction_dir: &Path,
        destination: &DestinationPath,
    ) -> bool {
        let user_id = &job.source.user_id;
        let uploaded = match to_upload_path(member, extraction_dir, destination, user_id) {
            Ok(remote) => match self.storage.upload_file(user_id, &remote, member).await {
                Ok(()) => {
                    tracing::debug!(step = "upload", remote = %remote, "Member uploaded");
                    true
                }
                Err(source) => {
                    let err = JobError::Upload {
                        path: remote.clone(),
                        source,
                    };
                    tracing::warn!(error = %err, "Upload failed, retrying with absolute path");

                    let dav_path = to_dav_path(user_id, &remote);
                    match self
                        .storage
                        .upload_file_absolute(user_id, &dav_path, member)
                        .await
                    {
                        Ok(()) => {
                            tracing::debug!(step = "upload", dav_path = %dav_path, "Member uploaded via fallback");
                            true
                        }
                        Err(e) => {
                            tracing::error!(error = %e, remote = %remote, "Fallback upload failed, skipping member");
                            false
                        }
                    }
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Skipping member");
                false
            }
        };

        if let Err(e) = tokio::fs::remove_file(member).await {
            let err = JobError::Cleanup(e);
            tracing::warn!(error = %err, path = %member.display(), "Failed to delete extracted member");
        }
        uploaded
    }

    async fn remove_scratch_dir(&self, job: &ExtractionJob) {
        match tokio::fs::remove_dir_all(&job.local_scratch_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let err = JobError::Cleanup(e);
                tracing::warn!(
                    error = %err,
                    path = %job.local_scratch_dir.display(),
                    "Failed to remove scratch directory"
                );
            }
        }
    }

    async fn send_notification(&self, job: &ExtractionJob, outcome: &JobOutcome) {
        let name = &job.source.display_name;
        let (subject, message) = if outcome.is_success() {
            (format!("{} finished!", name), SUCCESS_MESSAGE)
        } else {
            (format!("{} could not be extracted", name), FAILURE_MESSAGE)
        };

        if let Err(e) = self
            .notifier
            .notify(&job.source.user_id, &subject, message)
            .await
        {
            tracing::warn!(error = %e, "Failed to send notification");
        }
    }
}

/// Every regular file under `dir`, in a stable order.
async fn collect_files(dir: PathBuf) -> Result<Vec<PathBuf>> {
    tokio::task::spawn_blocking(move || {
        WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>()
    })
    .await
    .context("Directory walk task failed")
}
