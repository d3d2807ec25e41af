//! Service wiring

use anyhow::{Context, Result};
use std::sync::Arc;
use unpacker_core::{Config, Notifier};
use unpacker_processing::ExtractionOrchestrator;
use unpacker_services::{FilesActionsMenu, InitStatusReporter, OcsClient, OcsNotifier};
use unpacker_storage::RemoteStorage;

use crate::job_queue::ExtractionJobSpawner;
use crate::state::AppState;

/// Build the application state with notifications delivered over OCS.
pub fn initialize_services(
    config: &Config,
    storage: Arc<dyn RemoteStorage>,
) -> Result<Arc<AppState>> {
    let ocs = OcsClient::from_config(config).context("Failed to create OCS client")?;
    let notifier: Arc<dyn Notifier> = Arc::new(OcsNotifier::new(ocs.clone()));
    Ok(build_state(config, ocs, storage, notifier))
}

/// Build the application state around the given storage and notifier.
pub fn initialize_services_with_notifier(
    config: &Config,
    storage: Arc<dyn RemoteStorage>,
    notifier: Arc<dyn Notifier>,
) -> Result<Arc<AppState>> {
    let ocs = OcsClient::from_config(config).context("Failed to create OCS client")?;
    Ok(build_state(config, ocs, storage, notifier))
}

fn build_state(
    config: &Config,
    ocs: OcsClient,
    storage: Arc<dyn RemoteStorage>,
    notifier: Arc<dyn Notifier>,
) -> Arc<AppState> {
    let orchestrator = Arc::new(ExtractionOrchestrator::new(storage, notifier));
    let jobs = ExtractionJobSpawner::new(orchestrator, config.scratch_dir().clone());

    tracing::info!(scratch_root = %config.scratch_dir().display(), "Services initialized");

    Arc::new(AppState {
        config: config.clone(),
        jobs,
        files_menu: FilesActionsMenu::new(ocs.clone()),
        init_status: InitStatusReporter::new(ocs),
    })
}
