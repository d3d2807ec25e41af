//! Hooks and traits for outbound side channels
//!
//! The extraction jobs report outcomes through these traits so they do not
//! depend on how a notification actually reaches the user.

use async_trait::async_trait;

/// Delivers a user-visible notification. Fire-and-forget from the caller's side:
/// an `Err` is logged by the caller and never changes a job's outcome.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: &str, subject: &str, message: &str) -> Result<(), String>;
}
