//! Application state shared by every handler.

use unpacker_core::Config;
use unpacker_services::{FilesActionsMenu, InitStatusReporter};

use crate::job_queue::ExtractionJobSpawner;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jobs: ExtractionJobSpawner,
    pub files_menu: FilesActionsMenu,
    pub init_status: InitStatusReporter,
}
