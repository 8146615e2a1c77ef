//! Trade negotiation error types.

use fast_session::SessionError;
use thiserror::Error;

/// Errors raised while negotiating one contract.
///
/// A business rejection (`Proposal`, `Purchase`) is an expected outcome the
/// service communicated deliberately; `Protocol` means the service's answer
/// could not be understood at all, which points at a version mismatch and
/// is logged loudly rather than treated as a routine rejection.
#[derive(Debug, Error)]
pub enum TradeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("proposal rejected: {message}")]
    Proposal { message: String },

    #[error("purchase rejected: {message}")]
    Purchase { message: String },

    #[error("unexpected response shape: {0}")]
    Protocol(String),
}

pub type TradeResult<T> = Result<T, TradeError>;
