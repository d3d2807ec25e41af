//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; anything that
//! converts into `AppError` renders as a JSON [`ErrorResponse`].
//!
//! Rendered bodies never carry diagnostics. The detailed body travels in the
//! response extensions and [`error_details_middleware`] swaps it in when the
//! loaded configuration allows it.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_LENGTH, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use unpacker_core::{AppError, ErrorMetadata, LogLevel};
use unpacker_infra::ErrorResponse;

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: both the trait and `AppError` are foreign to this crate).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = ?error, error_type = error_type, "Error occurred");
        }
    }
}

/// Whether error responses may include `details` and `error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDetailPolicy {
    pub expose: bool,
}

impl ErrorDetailPolicy {
    pub fn from_config(config: &unpacker_core::Config) -> Self {
        Self {
            expose: !config.is_production(),
        }
    }
}

/// Full error body, attached to the response by `HttpAppError`.
#[derive(Debug, Clone)]
struct DetailedError(ErrorResponse);

/// Replace the plain error body with the detailed one when `policy` exposes it.
pub async fn error_details_middleware(
    State(policy): State<ErrorDetailPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(DetailedError(detailed)) = response.extensions_mut().remove::<DetailedError>() else {
        return response;
    };
    if !policy.expose {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let (rendered, body) = Json(detailed).into_response().into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.extend(rendered.headers);
    Response::from_parts(parts, body)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::new(app_error.client_message(), app_error.error_code());
        let detailed = if matches!(app_error, AppError::Unauthorized(_)) {
            None
        } else {
            let mut detailed = body.clone();
            detailed.details = Some(app_error.to_string());
            detailed.error_type = Some(app_error.error_type().to_string());
            Some(DetailedError(detailed))
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(detailed) = detailed {
            response.extensions_mut().insert(detailed);
        }
        response
    }
}
