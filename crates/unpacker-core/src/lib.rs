//! Unpacker Core Library
//!
//! This crate provides the domain models, error types, configuration and AppAPI
//! credential handling shared by every Unpacker component.

pub mod app_api;
pub mod config;
pub mod constants;
pub mod error;
pub mod hooks;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use app_api::{AppApiCredentials, AppApiError, AuthenticatedUser};
pub use config::{BaseConfig, Config, ExAppConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use hooks::Notifier;
