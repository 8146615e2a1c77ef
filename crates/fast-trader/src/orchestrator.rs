//! Per-signal fan-out across durations.

use crate::negotiator::propose;
use crate::purchase::purchase;
use fast_core::{ContractSpec, NegotiationStep, TradeDefaults, TradeOutcome, TradeSignal};
use fast_notify::Notifier;
use fast_session::{Session, SessionConfig};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Fans one inbound signal out into one independent execution per duration.
///
/// Executions run concurrently on their own sessions and are mutually
/// non-blocking: one duration's failure never cancels, delays, or corrupts
/// a sibling. The caller always receives exactly one terminal outcome per
/// duration, in input order.
pub struct TradeOrchestrator {
    session: Arc<SessionConfig>,
    defaults: Arc<TradeDefaults>,
    notifier: Arc<dyn Notifier>,
}

impl TradeOrchestrator {
    pub fn new(
        session: SessionConfig,
        defaults: TradeDefaults,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session: Arc::new(session),
            defaults: Arc::new(defaults),
            notifier,
        }
    }

    /// Execute the signal: one negotiation per duration.
    ///
    /// All executions are launched before any is awaited so their network
    /// I/O overlaps. Every error (transport, auth, business rejection,
    /// malformed response, even a panicked task) is converted into a
    /// `Failed` outcome at the failing step; nothing escapes to abort a
    /// sibling. Outcomes come back in the order of `signal.durations`
    /// regardless of completion order.
    ///
    /// There is deliberately no deduplication: executing the same signal
    /// twice places two independent sets of trades. Partially completed
    /// purchases are never rolled back; the remote service is the system
    /// of record.
    pub async fn execute(&self, signal: TradeSignal) -> Vec<TradeOutcome> {
        let signal = Arc::new(signal);
        info!(
            direction = %signal.direction,
            instrument = %signal.instrument,
            durations = ?signal.durations,
            "Executing signal"
        );

        let handles: Vec<(u32, JoinHandle<TradeOutcome>)> = signal
            .durations
            .iter()
            .map(|&duration| {
                let spec = ContractSpec::from_signal(&signal, duration, &self.defaults);
                let session = Arc::clone(&self.session);
                let notifier = Arc::clone(&self.notifier);
                let signal = Arc::clone(&signal);
                let handle = tokio::spawn(async move {
                    let outcome = run_negotiation(&session, spec).await;
                    notifier.notify(&signal, &outcome);
                    outcome
                });
                (duration, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (duration, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(duration, %e, "Execution task died");
                    TradeOutcome::failed(
                        duration,
                        NegotiationStep::Authorize,
                        format!("execution task died: {e}"),
                    )
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Drive one duration's negotiation to its terminal outcome.
///
/// The state machine is strictly linear: authorize → propose → purchase,
/// each step consuming the prior step's validated output. The session is
/// released on every exit path.
async fn run_negotiation(config: &SessionConfig, spec: ContractSpec) -> TradeOutcome {
    let duration = spec.duration;

    let mut session = match Session::open(config).await {
        Ok(session) => session,
        Err(e) => {
            warn!(duration, %e, "Authorize step failed");
            return TradeOutcome::failed(duration, NegotiationStep::Authorize, e.to_string());
        }
    };

    let proposal = match propose(&mut session, &spec).await {
        Ok(proposal) => proposal,
        Err(e) => {
            warn!(duration, %e, "Propose step failed");
            session.close().await;
            return TradeOutcome::failed(duration, NegotiationStep::Propose, e.to_string());
        }
    };

    match purchase(session, &proposal, spec.amount).await {
        Ok(receipt) => TradeOutcome::purchased(duration, receipt),
        Err(e) => {
            warn!(duration, %e, "Purchase step failed");
            TradeOutcome::failed(duration, NegotiationStep::Purchase, e.to_string())
        }
    }
}
