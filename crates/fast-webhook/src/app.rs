//! Application wiring and HTTP surface.
//!
//! Three routes: the inbound webhook, a liveness banner, and Prometheus
//! metrics. The webhook handler validates the request body, runs the trade
//! orchestrator, and answers with the ordered outcome list; validation
//! failures are rejected with 422 before any network call.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use fast_core::{SignalRequest, TradeDefaults, TradeSignal};
use fast_notify::Notifier;
use fast_telemetry::Metrics;
use fast_trader::TradeOrchestrator;

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<TradeOrchestrator>,
    defaults: TradeDefaults,
}

/// The webhook application.
pub struct Application {
    config: AppConfig,
    state: AppState,
}

impl Application {
    /// Wire the orchestrator from configuration, service token, and
    /// notifier.
    pub fn new(config: AppConfig, api_token: String, notifier: Arc<dyn Notifier>) -> Self {
        let session = config.session_config(api_token);
        let defaults = config.trade.clone();
        let orchestrator = Arc::new(TradeOrchestrator::new(
            session,
            defaults.clone(),
            notifier,
        ));
        Self {
            config,
            state: AppState {
                orchestrator,
                defaults,
            },
        }
    }

    /// The axum router (exposed separately for tests).
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(self) -> AppResult<()> {
        let addr: SocketAddr = self
            .config
            .server
            .bind_addr
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid bind address: {e}")))?;

        let router = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "Webhook server listening");
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/webhook", post(handle_webhook))
        .route("/metrics", get(export_metrics))
        .with_state(state)
}

/// Liveness banner.
async fn index() -> &'static str {
    "FAST webhook is running"
}

/// Handle one inbound signal event.
async fn handle_webhook(
    State(state): State<AppState>,
    Json(request): Json<SignalRequest>,
) -> Response {
    let signal = match TradeSignal::from_request(request, &state.defaults) {
        Ok(signal) => signal,
        Err(e) => {
            Metrics::validation_rejected();
            warn!(%e, "Rejected webhook request");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"status": "error", "message": e.to_string()})),
            )
                .into_response();
        }
    };

    Metrics::signal_received(&signal.direction.to_string());
    let direction = signal.direction;
    let instrument = signal.instrument.clone();

    let outcomes = state.orchestrator.execute(signal).await;
    for outcome in &outcomes {
        Metrics::trade_outcome(&outcome.status.to_string(), &outcome.step.to_string());
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "signal": direction,
            "instrument": instrument,
            "outcomes": outcomes,
        })),
    )
        .into_response()
}

/// Prometheus text exposition.
async fn export_metrics() -> Response {
    match Metrics::export() {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
