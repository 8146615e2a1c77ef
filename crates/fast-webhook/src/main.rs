//! FAST signal-to-trade webhook - entry point.
//!
//! Receives BUY/SELL signal events over HTTP and negotiates binary-options
//! contracts with the trading service, one session per requested duration.

use anyhow::Result;
use clap::Parser;
use fast_notify::{NullNotifier, Notifier, TelegramConfig, TelegramNotifier};
use std::sync::Arc;
use tracing::info;

/// FAST signal-to-trade webhook
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via FAST_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    fast_session::init_crypto();

    let args = Args::parse();

    fast_telemetry::init_logging()?;

    info!("Starting FAST webhook v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > FAST_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("FAST_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = fast_webhook::AppConfig::load(&config_path)?;

    let api_token = std::env::var("FAST_AUTOTRADE")
        .map_err(|_| anyhow::anyhow!("FAST_AUTOTRADE environment variable is not set"))?;

    // Missing notification credentials degrade to skipped notifications,
    // never a startup failure.
    let notifier: Arc<dyn Notifier> = match TelegramConfig::from_env() {
        Some(telegram) => {
            info!(chat_id = telegram.chat_id, "Telegram notifications enabled");
            Arc::new(TelegramNotifier::new(telegram))
        }
        None => {
            info!("Telegram credentials not configured, notifications skipped");
            Arc::new(NullNotifier)
        }
    };

    let app = fast_webhook::Application::new(config, api_token, notifier);
    app.run().await?;

    Ok(())
}
