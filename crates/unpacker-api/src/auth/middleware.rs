use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use unpacker_core::constants::{HEADER_APP_API_AUTH, HEADER_EX_APP_ID};
use unpacker_core::{AppApiCredentials, AppError};

use crate::error::HttpAppError;

#[derive(Clone)]
pub struct AuthState {
    pub credentials: AppApiCredentials,
}

/// Verify the AppAPI headers and attach the acting user to the request.
///
/// Handlers behind this layer extract `Extension<AuthenticatedUser>`; the user
/// id is empty for calls Nextcloud makes on its own behalf.
pub async fn app_api_auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let (authorization, app_id) = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        };
        (header(HEADER_APP_API_AUTH), header(HEADER_EX_APP_ID))
    };

    match auth_state
        .credentials
        .verify(authorization.as_deref(), app_id.as_deref())
    {
        Ok(user) => {
            tracing::debug!(user = %user.user_id(), path = %request.uri().path(), "AppAPI request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "Rejected AppAPI request");
            HttpAppError(AppError::from(e)).into_response()
        }
    }
}
