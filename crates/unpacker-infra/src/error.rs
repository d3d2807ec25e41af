//! HTTP error response body
//!
//! The `IntoResponse` conversion for `AppError` lives in the binary crate
//! (unpacker-api); this crate only owns the wire format.

use serde::Serialize;

/// Standard error response format for HTTP APIs
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_type: None,
            code: code.into(),
        }
    }
}
