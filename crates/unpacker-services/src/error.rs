use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Request to {path} failed with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("OCS call {path} failed with statuscode {statuscode}: {message}")]
    Ocs {
        path: String,
        statuscode: i64,
        message: String,
    },

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Client(err.to_string())
    }
}
