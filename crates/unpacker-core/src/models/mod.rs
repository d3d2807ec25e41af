pub mod archive;
pub mod destination;
pub mod file_action;
pub mod job;

pub use archive::ArchiveLayout;
pub use destination::DestinationPath;
pub use file_action::UiActionFileInfo;
pub use job::{ExtractionJob, ExtractionMode, SourceFile};
