//! Files-menu action handlers
//!
//! Both handlers only validate the payload and spawn the job; the response
//! goes back before any download starts.

use axum::{extract::State, http::StatusCode, Extension};
use std::sync::Arc;
use unpacker_core::models::{ExtractionMode, SourceFile, UiActionFileInfo};
use unpacker_core::{AppError, AuthenticatedUser};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

pub async fn extract_to_auto(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(info): ValidatedJson<UiActionFileInfo>,
) -> Result<StatusCode, HttpAppError> {
    submit(&state, &user, &info, ExtractionMode::Auto)
}

pub async fn extract_to_parent(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(info): ValidatedJson<UiActionFileInfo>,
) -> Result<StatusCode, HttpAppError> {
    submit(&state, &user, &info, ExtractionMode::Parent)
}

/// The header user wins; the payload's `userId` only fills in for system calls.
fn acting_user(user: &AuthenticatedUser, info: &UiActionFileInfo) -> Option<String> {
    if !user.is_system() {
        return Some(user.user_id().to_string());
    }
    info.user_id.clone().filter(|id| !id.is_empty())
}

fn submit(
    state: &AppState,
    user: &AuthenticatedUser,
    info: &UiActionFileInfo,
    mode: ExtractionMode,
) -> Result<StatusCode, HttpAppError> {
    let user_id = acting_user(user, info)
        .ok_or_else(|| AppError::BadRequest("No user for this action".to_string()))?;
    if info.name.trim().is_empty() {
        return Err(AppError::InvalidInput("File name must not be empty".to_string()).into());
    }

    let source = SourceFile::from_action(info, &user_id);
    let (job_id, _handle) = state.jobs.submit(source, mode);
    tracing::info!(job_id = %job_id, file_id = info.file_id, mode = %mode, "Extraction accepted");
    Ok(StatusCode::OK)
}
