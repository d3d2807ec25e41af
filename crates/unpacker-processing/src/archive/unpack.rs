use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::ArchiveFormat;
use crate::error::JobError;

/// Unpack every member of an archive into a directory.
#[async_trait]
pub trait Unpacker: Send + Sync {
    /// Returns the number of regular files written under `dest`.
    async fn extract_all(&self, archive: &Path, dest: &Path) -> Result<usize, JobError>;
}

/// Zip and tar(.gz) unpacker. The format comes from the file extension;
/// anything unrecognised is opened as zip.
#[derive(Debug, Default, Clone)]
pub struct ArchiveUnpacker;

impl ArchiveUnpacker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Unpacker for ArchiveUnpacker {
    async fn extract_all(&self, archive: &Path, dest: &Path) -> Result<usize, JobError> {
        let archive = archive.to_path_buf();
        let dest = dest.to_path_buf();
        let format = ArchiveFormat::from_path(&archive).unwrap_or(ArchiveFormat::Zip);

        let written = tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dest)
                .map_err(|e| JobError::Extraction(format!("{}: {}", dest.display(), e)))?;
            match format {
                ArchiveFormat::Zip => extract_zip(&archive, &dest),
                ArchiveFormat::Tar => {
                    let file = open(&archive)?;
                    extract_tar(file, &dest)
                }
                ArchiveFormat::TarGz => {
                    let file = open(&archive)?;
                    extract_tar(GzDecoder::new(file), &dest)
                }
            }
        })
        .await
        .map_err(|e| JobError::Extraction(format!("Unpack task failed: {}", e)))??;

        tracing::debug!(files = written, format = ?format, "Archive unpacked");
        Ok(written)
    }
}

fn open(archive: &Path) -> Result<File, JobError> {
    File::open(archive).map_err(|e| JobError::Extraction(format!("{}: {}", archive.display(), e)))
}

/// Relative path for a member name, or `None` if it would escape the
/// destination. `\` counts as a separator, matching the inspector.
fn enclosed_member_path(name: &str) -> Option<PathBuf> {
    let unified = name.replace('\\', "/");
    let mut path = PathBuf::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            other if other.contains('\0') => return None,
            other => path.push(other),
        }
    }
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

fn write_member<R: Read>(reader: &mut R, out_path: &Path) -> Result<(), JobError> {
    let io_err = |e: std::io::Error| JobError::Extraction(format!("{}: {}", out_path.display(), e));
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut out_file = File::create(out_path).map_err(io_err)?;
    std::io::copy(reader, &mut out_file).map_err(io_err)?;
    Ok(())
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<usize, JobError> {
    let file = open(archive)?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| JobError::Extraction(format!("{}: {}", archive.display(), e)))?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| JobError::Extraction(e.to_string()))?;
        let name = entry.name().to_string();
        let Some(relative) = enclosed_member_path(&name) else {
            tracing::warn!(member = %name, "Skipping member outside the extraction directory");
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() || name.ends_with('\\') {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| JobError::Extraction(format!("{}: {}", out_path.display(), e)))?;
            continue;
        }
        write_member(&mut entry, &out_path)?;
        written += 1;
    }
    Ok(written)
}

fn extract_tar<R: Read>(reader: R, dest: &Path) -> Result<usize, JobError> {
    let mut archive = tar::Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| JobError::Extraction(e.to_string()))?;

    let mut written = 0;
    for entry in entries {
        let mut entry = entry.map_err(|e| JobError::Extraction(e.to_string()))?;
        let name = entry
            .path()
            .map_err(|e| JobError::Extraction(e.to_string()))?
            .to_string_lossy()
            .into_owned();
        let Some(relative) = enclosed_member_path(&name) else {
            tracing::warn!(member = %name, "Skipping member outside the extraction directory");
            continue;
        };
        let out_path = dest.join(relative);

        let entry_type = entry.header().entry_type();
        if entry_type.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| JobError::Extraction(format!("{}: {}", out_path.display(), e)))?;
        } else if entry_type.is_file() {
            write_member(&mut entry, &out_path)?;
            written += 1;
        }
    }
    Ok(written)
}
