//! Session error types.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("authorization rejected: {message}")]
    Auth { message: String },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("connection closed by the service")]
    Closed,

    #[error("unexpected response shape: {0}")]
    Protocol(String),

    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
