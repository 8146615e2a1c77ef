//! Terminal outcomes of per-duration negotiations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress states of a single negotiation.
///
/// Transitions only move forward: `Authorized` → `Proposed` → `Purchased`,
/// with `Failed` reachable from any point. `Purchased` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Authorized,
    Proposed,
    Purchased,
    Failed,
}

impl TradeStatus {
    /// Whether this state ends the negotiation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Purchased | Self::Failed)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorized => write!(f, "authorized"),
            Self::Proposed => write!(f, "proposed"),
            Self::Purchased => write!(f, "purchased"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Protocol step of the three-step negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationStep {
    Authorize,
    Propose,
    Purchase,
}

impl fmt::Display for NegotiationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorize => write!(f, "authorize"),
            Self::Propose => write!(f, "propose"),
            Self::Purchase => write!(f, "purchase"),
        }
    }
}

/// Confirmation fields echoed by the service on a successful purchase.
///
/// Every field is optional: the confirmation object is taken as-is from
/// the service and missing members must not fail the trade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub contract_id: Option<u64>,
    pub buy_price: Option<Decimal>,
    pub transaction_id: Option<u64>,
    pub longcode: Option<String>,
}

/// The terminal result of one duration's negotiation.
///
/// Produced exactly once per execution task and consumed both by the
/// notifier and by the aggregate webhook response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeOutcome {
    /// The duration this execution negotiated for.
    pub duration: u32,
    /// Terminal status (`Purchased` or `Failed`).
    pub status: TradeStatus,
    /// The protocol step at which the negotiation ended: the failing step
    /// on failure, `Purchase` on success.
    pub step: NegotiationStep,
    /// Free-form diagnostic (service message, timeout note, longcode).
    pub detail: String,
    /// Purchase confirmation, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PurchaseReceipt>,
}

impl TradeOutcome {
    /// Successful terminal outcome.
    pub fn purchased(duration: u32, receipt: PurchaseReceipt) -> Self {
        let detail = receipt
            .longcode
            .clone()
            .unwrap_or_else(|| "contract purchased".to_string());
        Self {
            duration,
            status: TradeStatus::Purchased,
            step: NegotiationStep::Purchase,
            detail,
            receipt: Some(receipt),
        }
    }

    /// Failed terminal outcome at the given protocol step.
    pub fn failed(duration: u32, step: NegotiationStep, detail: impl Into<String>) -> Self {
        Self {
            duration,
            status: TradeStatus::Failed,
            step,
            detail: detail.into(),
            receipt: None,
        }
    }

    pub fn is_purchased(&self) -> bool {
        self.status == TradeStatus::Purchased
    }
}
