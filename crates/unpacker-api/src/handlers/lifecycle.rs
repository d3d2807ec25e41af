//! AppAPI lifecycle callbacks: `PUT /enabled` and `POST /init`.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnabledQuery {
    pub enabled: u8,
}

/// Register the files-menu actions when enabled, remove them when disabled.
///
/// AppAPI expects HTTP 200 with `{"error": ""}` on success and a non-empty
/// message otherwise.
#[tracing::instrument(skip(state))]
pub async fn set_enabled(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EnabledQuery>,
) -> impl IntoResponse {
    let enabled = query.enabled != 0;
    let error = match state.files_menu.set_enabled(enabled).await {
        Ok(()) => {
            tracing::info!(enabled, "ExApp state changed");
            String::new()
        }
        Err(e) => {
            tracing::error!(error = %e, enabled, "Failed to update files menu actions");
            e.to_string()
        }
    };
    Json(json!({ "error": error }))
}

/// Acknowledge init right away; progress is reported from a background task.
pub async fn init(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let reporter = state.init_status.clone();
    tokio::spawn(async move {
        if let Err(e) = reporter.report_progress(100).await {
            tracing::error!(error = %e, "Failed to report init progress");
            if let Err(e) = reporter.report_error(&e.to_string()).await {
                tracing::error!(error = %e, "Failed to report init error");
            }
        }
    });
    Json(json!({}))
}
