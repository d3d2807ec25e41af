//! Route configuration and setup

use crate::auth::{app_api_auth_middleware, AuthState};
use crate::constants::{
    ENABLED_PATH, EXTRACT_TO_AUTO_PATH, EXTRACT_TO_PARENT_PATH, HEARTBEAT_PATH, INIT_PATH,
    MAX_REQUEST_BODY_BYTES,
};
use crate::error::{error_details_middleware, ErrorDetailPolicy};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{MatchedPath, Request},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use unpacker_infra::{get_request_id, request_id_middleware};

fn http_span(request: &Request) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str())
        .unwrap_or_else(|| request.uri().path());
    tracing::info_span!(
        "http_request",
        http.method = %request.method(),
        http.route = %route,
        request_id = %get_request_id(request).unwrap_or_default(),
    )
}

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let auth_state = Arc::new(AuthState {
        credentials: state.config.credentials(),
    });
    let error_policy = ErrorDetailPolicy::from_config(&state.config);

    // AppAPI polls the heartbeat before the app is registered, so it carries no signature
    let public_routes = Router::new().route(HEARTBEAT_PATH, get(handlers::health::heartbeat));

    let protected_routes = Router::new()
        .route(ENABLED_PATH, put(handlers::lifecycle::set_enabled))
        .route(INIT_PATH, post(handlers::lifecycle::init))
        .route(
            EXTRACT_TO_AUTO_PATH,
            post(handlers::file_actions::extract_to_auto),
        )
        .route(
            EXTRACT_TO_PARENT_PATH,
            post(handlers::file_actions::extract_to_parent),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            app_api_auth_middleware,
        ));

    public_routes
        .merge(protected_routes)
        .layer(axum::middleware::from_fn_with_state(
            error_policy,
            error_details_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(http_span))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
