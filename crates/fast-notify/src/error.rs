//! Notification error types.
//!
//! These never cross the notifier boundary: delivery errors are logged by
//! the background worker and dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;
