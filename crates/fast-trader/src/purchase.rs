//! Contract purchase.

use crate::error::{TradeError, TradeResult};
use crate::negotiator::Proposal;
use fast_core::PurchaseReceipt;
use fast_session::{service_error, BuyRequest, Session};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Buy the proposed contract, then release the session.
///
/// Takes the session by value: it is closed on every exit path, so no
/// connection outlives its negotiation. Proposal identifiers are
/// session-scoped; a proposal issued by a different session is rejected
/// before anything is sent.
pub async fn purchase(
    mut session: Session,
    proposal: &Proposal,
    stake: Decimal,
) -> TradeResult<PurchaseReceipt> {
    if proposal.session != session.id() {
        let issuer = proposal.session;
        let current = session.id();
        session.close().await;
        return Err(TradeError::Protocol(format!(
            "proposal {} was issued by session {issuer}, not {current}",
            proposal.id
        )));
    }

    let request = BuyRequest::new(proposal.id.clone(), stake);
    let result = session.exchange(&request).await;
    let session_id = session.id();
    session.close().await;

    let response = result?;
    if let Some(rejection) = service_error(&response) {
        warn!(session = %session_id, message = %rejection.message, "Purchase rejected");
        return Err(TradeError::Purchase {
            message: rejection.message,
        });
    }

    let body = response.get("buy").ok_or_else(|| {
        TradeError::Protocol("buy response carries no confirmation body".to_string())
    })?;
    let receipt: PurchaseReceipt = serde_json::from_value(body.clone())
        .map_err(|e| TradeError::Protocol(format!("malformed purchase confirmation: {e}")))?;

    info!(
        session = %session_id,
        contract_id = ?receipt.contract_id,
        buy_price = ?receipt.buy_price,
        "Contract purchased"
    );
    Ok(receipt)
}
