//! Unpacker Services Layer
//!
//! Thin clients for the Nextcloud OCS endpoints the ExApp calls: user
//! notifications, files-actions-menu registration and init progress reporting.
//! All of them share one signed [`OcsClient`].

pub mod error;
pub mod services;

pub use error::ServiceError;
pub use services::files_menu::{FileAction, FilesActionsMenu, EXTRACT_ACTIONS};
pub use services::init_status::InitStatusReporter;
pub use services::notifications::OcsNotifier;
pub use services::ocs::OcsClient;
