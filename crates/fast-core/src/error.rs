//! Error types for fast-core.

use rust_decimal::Decimal;
use thiserror::Error;

/// Inbound signal validation errors.
///
/// These are raised while turning a raw webhook body into a `TradeSignal`,
/// strictly before any network call is made, and are surfaced to the
/// webhook caller as a structured rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unrecognized signal direction: {0:?}")]
    InvalidDirection(String),

    #[error("instrument must be non-empty")]
    EmptyInstrument,

    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("durations must be non-empty")]
    EmptyDurations,

    #[error("duration must be a positive integer, got {0}")]
    InvalidDuration(i64),
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
