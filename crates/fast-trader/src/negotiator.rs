//! Proposal negotiation.

use crate::error::{TradeError, TradeResult};
use fast_core::ContractSpec;
use fast_session::{service_error, ProposalBody, ProposalRequest, Session, SessionId};
use rust_decimal::Decimal;
use tracing::{debug, error};

/// A priced proposal, pinned to the session that issued it.
///
/// The identifier is only redeemable on that session; `session` records the
/// issuer so the purchase step can reject cross-session reuse.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub id: String,
    pub ask_price: Option<Decimal>,
    pub payout: Option<Decimal>,
    pub longcode: Option<String>,
    pub session: SessionId,
}

/// Request a priced proposal for `spec` on the session.
///
/// A response with an error field is a business rejection
/// (`TradeError::Proposal`); a success shape without a proposal identifier
/// is `TradeError::Protocol` so callers can tell "the service rejected the
/// trade" apart from "we cannot parse the service's answer". The session is
/// left open either way; the caller decides when to close it.
pub async fn propose(session: &mut Session, spec: &ContractSpec) -> TradeResult<Proposal> {
    let request = ProposalRequest::from_spec(spec);
    let response = session.exchange(&request).await?;

    if let Some(rejection) = service_error(&response) {
        debug!(
            session = %session.id(),
            symbol = %spec.symbol,
            duration = spec.duration,
            message = %rejection.message,
            "Proposal rejected"
        );
        return Err(TradeError::Proposal {
            message: rejection.message,
        });
    }

    let body = response.get("proposal").ok_or_else(|| {
        error!(session = %session.id(), "Proposal response carries no proposal body");
        TradeError::Protocol("proposal response carries no proposal body".to_string())
    })?;

    let body: ProposalBody = serde_json::from_value(body.clone()).map_err(|e| {
        error!(session = %session.id(), %e, "Malformed proposal body");
        TradeError::Protocol(format!("malformed proposal body: {e}"))
    })?;

    debug!(
        session = %session.id(),
        proposal = %body.id,
        ask_price = ?body.ask_price,
        "Proposal priced"
    );

    Ok(Proposal {
        id: body.id,
        ask_price: body.ask_price,
        payout: body.payout,
        longcode: body.longcode,
        session: session.id(),
    })
}
