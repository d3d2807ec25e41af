//! Unpacker Infrastructure Library
//!
//! Shared infrastructure for the ExApp binary:
//! - Telemetry initialization
//! - Request ID middleware
//! - HTTP error body

pub mod error;
pub mod middleware;
pub mod telemetry;

pub use error::ErrorResponse;
pub use middleware::{get_request_id, request_id_middleware, RequestId};
pub use telemetry::init_telemetry;
