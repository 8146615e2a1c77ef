//! Inbound trading signals.
//!
//! `SignalRequest` is the raw webhook body shape; `TradeSignal` is the
//! validated, immutable instruction the orchestrator works with.

use crate::contract::TradeDefaults;
use crate::error::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction carried by the inbound signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Parse a direction case-insensitively ("buy", "BUY", "Sell", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Raw webhook request body.
///
/// Every field is optional at this stage; `TradeSignal::from_request`
/// decides what is required and what falls back to configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalRequest {
    /// Direction string, "BUY" or "SELL" (case-insensitive).
    pub signal: Option<String>,
    /// Instrument symbol (e.g., "frxUSDJPY").
    pub instrument: Option<String>,
    /// Stake amount. Falls back to the configured default.
    pub amount: Option<Decimal>,
    /// Contract durations. Falls back to the configured default list.
    pub durations: Option<Vec<i64>>,
    /// Opaque tag passed through to notifications.
    #[serde(alias = "score_tag")]
    pub correlation_tag: Option<String>,
}

/// A validated trading instruction.
///
/// Immutable once built; shared read-only across the per-duration
/// executions spawned for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeSignal {
    pub direction: Direction,
    pub instrument: String,
    pub amount: Decimal,
    pub durations: Vec<u32>,
    pub correlation_tag: Option<String>,
}

impl TradeSignal {
    /// Validate a raw request into a `TradeSignal`.
    ///
    /// Rejections happen here, before any network call: a missing or
    /// unrecognized `signal`, a missing or empty `instrument`, a
    /// non-positive amount, or a non-positive duration. An absent
    /// `durations` field substitutes the configured default list; a
    /// present-but-empty list is rejected.
    pub fn from_request(
        request: SignalRequest,
        defaults: &TradeDefaults,
    ) -> Result<Self, ValidationError> {
        let raw_direction = request
            .signal
            .ok_or(ValidationError::MissingField("signal"))?;
        let direction = Direction::parse(&raw_direction)
            .ok_or(ValidationError::InvalidDirection(raw_direction))?;

        let instrument = request
            .instrument
            .ok_or(ValidationError::MissingField("instrument"))?;
        if instrument.trim().is_empty() {
            return Err(ValidationError::EmptyInstrument);
        }

        let amount = request.amount.unwrap_or(defaults.amount);
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidAmount(amount));
        }

        let durations = match request.durations {
            None => defaults.durations.clone(),
            Some(raw) => {
                if raw.is_empty() {
                    return Err(ValidationError::EmptyDurations);
                }
                raw.into_iter()
                    .map(|d| {
                        u32::try_from(d)
                            .ok()
                            .filter(|d| *d > 0)
                            .ok_or(ValidationError::InvalidDuration(d))
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };
        if durations.is_empty() {
            return Err(ValidationError::EmptyDurations);
        }

        Ok(Self {
            direction,
            instrument,
            amount,
            durations,
            correlation_tag: request.correlation_tag,
        })
    }
}
