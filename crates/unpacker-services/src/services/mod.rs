pub mod files_menu;
pub mod init_status;
pub mod notifications;
pub mod ocs;
