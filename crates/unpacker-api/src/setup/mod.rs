//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use unpacker_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    unpacker_infra::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        app_id = %config.app_id(),
        app_version = %config.app_version(),
        nextcloud_url = %config.nextcloud_url(),
        "Configuration loaded and validated successfully"
    );

    // Leftovers from an interrupted previous run are discarded
    storage::prepare_scratch_root(config.scratch_dir()).await?;

    let storage = storage::setup_storage(&config)?;
    let state = services::initialize_services(&config, storage)?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
