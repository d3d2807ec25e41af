use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe AppAPI polls while deploying the ExApp.
pub async fn heartbeat() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
