//! Wire message types for the trading-service protocol.
//!
//! The protocol is three request/response pairs over one connection:
//! authorize, proposal, buy. Responses are plain JSON objects; a failure
//! carries `{"error": {"message": ...}}` and a success carries the
//! request-specific body under its own key.

use fast_core::{ContractKind, ContractSpec, DurationUnit};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"authorize": <token>}` handshake request.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizeRequest {
    pub authorize: String,
}

impl AuthorizeRequest {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            authorize: token.into(),
        }
    }
}

/// Flat proposal request.
///
/// Field names and shapes are dictated by the remote protocol; amounts go
/// out as JSON numbers, so the decimal stake is converted at this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalRequest {
    pub proposal: u8,
    pub amount: f64,
    pub basis: String,
    pub contract_type: ContractKind,
    pub currency: String,
    pub duration: u32,
    pub duration_unit: DurationUnit,
    pub symbol: String,
}

impl ProposalRequest {
    /// Build the request for one contract spec.
    pub fn from_spec(spec: &ContractSpec) -> Self {
        Self {
            proposal: 1,
            amount: spec.amount.to_f64().unwrap_or_default(),
            basis: spec.basis.clone(),
            contract_type: spec.contract_kind,
            currency: spec.currency.clone(),
            duration: spec.duration,
            duration_unit: spec.duration_unit,
            symbol: spec.symbol.clone(),
        }
    }
}

/// `{"buy": <proposal id>, "price": <number>}` purchase request.
///
/// The price is the stake: the maximum the caller will pay for the
/// contract, echoing what was proposed.
#[derive(Debug, Clone, Serialize)]
pub struct BuyRequest {
    pub buy: String,
    pub price: f64,
}

impl BuyRequest {
    pub fn new(proposal_id: impl Into<String>, price: Decimal) -> Self {
        Self {
            buy: proposal_id.into(),
            price: price.to_f64().unwrap_or_default(),
        }
    }
}

/// Error body carried by any failing response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Priced proposal body from a successful proposal response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposalBody {
    /// Opaque proposal identifier, valid only within the issuing session.
    pub id: String,
    #[serde(default)]
    pub ask_price: Option<Decimal>,
    #[serde(default)]
    pub payout: Option<Decimal>,
    #[serde(default)]
    pub longcode: Option<String>,
}

/// Extract the service error from a response, if present.
///
/// A malformed error object still yields an `ErrorBody` with the raw JSON
/// as the message, so a failing response is never mistaken for success.
pub fn service_error(response: &Value) -> Option<ErrorBody> {
    let error = response.get("error")?;
    match serde_json::from_value(error.clone()) {
        Ok(body) => Some(body),
        Err(_) => Some(ErrorBody {
            message: error.to_string(),
            code: None,
        }),
    }
}
