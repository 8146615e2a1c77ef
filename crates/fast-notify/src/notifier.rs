//! Notifier trait and the no-op fallback.

use fast_core::{TradeOutcome, TradeSignal};
use tracing::debug;

/// Delivers terminal trade outcomes to an external channel.
///
/// `notify` enqueues only and never fails observably: delivery failure must
/// not alter the orchestrator's return value or retry the trade.
pub trait Notifier: Send + Sync {
    fn notify(&self, signal: &TradeSignal, outcome: &TradeOutcome);
}

/// Fallback used when notification credentials are not configured.
///
/// Logs each skipped outcome at debug level and does nothing else, so a
/// deployment without a channel still trades normally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, signal: &TradeSignal, outcome: &TradeOutcome) {
        debug!(
            instrument = %signal.instrument,
            duration = outcome.duration,
            status = %outcome.status,
            "Notification skipped (no channel configured)"
        );
    }
}
