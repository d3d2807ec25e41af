//! Unpacker Processing Library
//!
//! Archive inspection, destination inference, remote path translation and the
//! per-job extraction pipeline.

pub mod archive;
pub mod destination;
pub mod error;
pub mod extraction;
pub mod remote_path;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use archive::{inspect, ArchiveFormat, ArchiveUnpacker, Unpacker};
pub use destination::resolve;
pub use error::JobError;
pub use extraction::{ExtractionOrchestrator, JobOutcome};
pub use remote_path::{to_dav_path, to_upload_path};
