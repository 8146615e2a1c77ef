//! Contract specification derived from a signal.
//!
//! A `ContractSpec` is the per-duration unit of work: one spec is derived
//! for each requested duration and owned by exactly one execution task.

use crate::signal::{Direction, TradeSignal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional contract kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractKind {
    /// Bet that the price will rise.
    Call,
    /// Bet that the price will fall.
    Put,
}

impl From<Direction> for ContractKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Buy => Self::Call,
            Direction::Sell => Self::Put,
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Contract duration unit, fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DurationUnit {
    #[default]
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "m")]
    Minutes,
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds => write!(f, "s"),
            Self::Minutes => write!(f, "m"),
        }
    }
}

/// Deployment-level trade defaults.
///
/// Substituted into inbound requests that omit the optional fields, and
/// applied to every derived contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDefaults {
    /// Stake used when the request carries no amount.
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    /// Durations used when the request carries none.
    #[serde(default = "default_durations")]
    pub durations: Vec<u32>,
    /// Contract currency.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Unit applied to every duration value.
    #[serde(default)]
    pub duration_unit: DurationUnit,
}

fn default_amount() -> Decimal {
    Decimal::ONE
}

fn default_durations() -> Vec<u32> {
    vec![60]
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for TradeDefaults {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            durations: default_durations(),
            currency: default_currency(),
            duration_unit: DurationUnit::default(),
        }
    }
}

/// One duration's contract specification.
///
/// Derived 1:1 from `(TradeSignal, duration)`; immutable and never shared
/// across execution tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractSpec {
    pub contract_kind: ContractKind,
    pub amount: Decimal,
    pub currency: String,
    pub duration: u32,
    pub duration_unit: DurationUnit,
    pub symbol: String,
    pub basis: String,
}

impl ContractSpec {
    /// Derive the spec for one of the signal's durations.
    pub fn from_signal(signal: &TradeSignal, duration: u32, defaults: &TradeDefaults) -> Self {
        Self {
            contract_kind: ContractKind::from(signal.direction),
            amount: signal.amount,
            currency: defaults.currency.clone(),
            duration,
            duration_unit: defaults.duration_unit,
            symbol: signal.instrument.clone(),
            basis: "stake".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn signal() -> TradeSignal {
        TradeSignal {
            direction: Direction::Sell,
            instrument: "frxEURUSD".to_string(),
            amount: dec!(5),
            durations: vec![60, 300],
            correlation_tag: None,
        }
    }

    #[test]
    fn test_direction_maps_to_contract_kind() {
        assert_eq!(ContractKind::from(Direction::Buy), ContractKind::Call);
        assert_eq!(ContractKind::from(Direction::Sell), ContractKind::Put);
    }

    #[test]
    fn test_spec_derivation() {
        let spec = ContractSpec::from_signal(&signal(), 300, &TradeDefaults::default());
        assert_eq!(spec.contract_kind, ContractKind::Put);
        assert_eq!(spec.amount, dec!(5));
        assert_eq!(spec.currency, "USD");
        assert_eq!(spec.duration, 300);
        assert_eq!(spec.duration_unit, DurationUnit::Seconds);
        assert_eq!(spec.symbol, "frxEURUSD");
        assert_eq!(spec.basis, "stake");
    }

    #[test]
    fn test_duration_unit_wire_form() {
        assert_eq!(
            serde_json::to_string(&DurationUnit::Seconds).unwrap(),
            r#""s""#
        );
        assert_eq!(
            serde_json::to_string(&DurationUnit::Minutes).unwrap(),
            r#""m""#
        );
        assert_eq!(serde_json::to_string(&ContractKind::Call).unwrap(), r#""CALL""#);
    }
}
