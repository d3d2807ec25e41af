use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use unpacker_core::models::{ExtractionJob, ExtractionMode, SourceFile};
use unpacker_processing::{ExtractionOrchestrator, JobOutcome};

/// Starts one detached task per extraction request.
///
/// There is no queue or concurrency cap: every accepted action runs
/// immediately alongside the others.
#[derive(Clone)]
pub struct ExtractionJobSpawner {
    orchestrator: Arc<ExtractionOrchestrator>,
    scratch_root: PathBuf,
}

impl ExtractionJobSpawner {
    pub fn new(orchestrator: Arc<ExtractionOrchestrator>, scratch_root: PathBuf) -> Self {
        Self {
            orchestrator,
            scratch_root,
        }
    }

    /// Spawn the job and return its id with the task handle. Dropping the
    /// handle leaves the job running.
    #[tracing::instrument(skip(self, source), fields(user = %source.user_id, mode = %mode))]
    pub fn submit(&self, source: SourceFile, mode: ExtractionMode) -> (Uuid, JoinHandle<JobOutcome>) {
        let job = ExtractionJob::new(source, mode, &self.scratch_root);
        let job_id = job.id;
        tracing::info!(
            job_id = %job_id,
            source = %job.source.path_in_user_space,
            "Spawning extraction job"
        );

        let orchestrator = self.orchestrator.clone();
        let handle = tokio::spawn(async move { orchestrator.run(job).await });
        (job_id, handle)
    }
}
