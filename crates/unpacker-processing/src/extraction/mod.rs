//! Per-job extraction pipeline

mod orchestrator;

pub use orchestrator::{ExtractionOrchestrator, JobOutcome};
