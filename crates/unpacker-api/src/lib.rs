//! Unpacker API Library
//!
//! HTTP surface of the ExApp: the AppAPI lifecycle endpoints, the two
//! files-menu action handlers and the application setup.

pub mod constants;
mod handlers;
mod job_queue;
pub mod setup;

pub mod auth;
pub mod error;
pub mod state;

pub use error::HttpAppError;
pub use job_queue::ExtractionJobSpawner;
