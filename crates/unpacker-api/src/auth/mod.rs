//! AppAPI request authentication

pub mod middleware;

pub use middleware::{app_api_auth_middleware, AuthState};
