use std::fs::File;
use std::path::Path;
use unpacker_core::models::ArchiveLayout;

use crate::error::JobError;

/// Classify the top level of a zip archive from its central directory only.
///
/// Member data is never read, so this is cheap even for large archives.
pub fn inspect(archive_path: &Path) -> Result<ArchiveLayout, JobError> {
    let file = File::open(archive_path)
        .map_err(|e| JobError::UnreadableArchive(format!("{}: {}", archive_path.display(), e)))?;
    let archive = zip::ZipArchive::new(file)
        .map_err(|e| JobError::UnreadableArchive(format!("{}: {}", archive_path.display(), e)))?;

    let layout = ArchiveLayout::from_member_names(archive.file_names());
    tracing::debug!(
        archive = %archive_path.display(),
        root_files = layout.root_file_count,
        root_folders = layout.root_folder_count(),
        "Inspected archive layout"
    );
    Ok(layout)
}
