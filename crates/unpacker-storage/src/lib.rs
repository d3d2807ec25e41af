//! Unpacker Storage Library
//!
//! This crate provides the remote storage abstraction the extraction jobs
//! download from and upload to, and its WebDAV implementation.
//!
//! # Path format
//!
//! Callers pass user-relative paths (`/Documents/report.zip`). The WebDAV
//! backend qualifies them as `/files/{user}/...` under `remote.php/dav`.

pub mod factory;
pub mod traits;
pub mod webdav;

// Re-export commonly used types
pub use factory::create_storage;
pub use traits::{RemoteStorage, StorageError, StorageResult};
pub use webdav::{dav_files_path, WebDavStorage};
