//! Prometheus metrics for the FAST service.
//!
//! # Panics
//!
//! Registration `unwrap()`s on purpose: a duplicate metric name is a
//! programming error that should abort at first use of the static, not
//! surface as a missing time series later.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_int_counter, CounterVec, Encoder, IntCounter, TextEncoder,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Total inbound signals accepted for execution.
/// Labels: direction (BUY/SELL)
pub static SIGNALS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "fast_signals_total",
        "Total inbound signals accepted for execution",
        &["direction"]
    )
    .unwrap()
});

/// Total inbound requests rejected by validation.
pub static VALIDATION_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "fast_validation_rejected_total",
        "Total inbound requests rejected before any network call"
    )
    .unwrap()
});

/// Terminal trade outcomes.
/// Labels: status (purchased/failed), step (authorize/propose/purchase)
pub static TRADE_OUTCOMES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "fast_trade_outcomes_total",
        "Terminal trade outcomes by status and protocol step",
        &["status", "step"]
    )
    .unwrap()
});

/// Facade over the metric statics.
pub struct Metrics;

impl Metrics {
    /// Record an accepted inbound signal.
    pub fn signal_received(direction: &str) {
        SIGNALS_TOTAL.with_label_values(&[direction]).inc();
    }

    /// Record a validation rejection.
    pub fn validation_rejected() {
        VALIDATION_REJECTED_TOTAL.inc();
    }

    /// Record one terminal trade outcome.
    pub fn trade_outcome(status: &str, step: &str) {
        TRADE_OUTCOMES_TOTAL.with_label_values(&[status, step]).inc();
    }

    /// Render all registered metrics in Prometheus text exposition format.
    pub fn export() -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let families = prometheus::gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
