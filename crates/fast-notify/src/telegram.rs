//! Telegram delivery.
//!
//! Outbound messages are queued to a background worker over an unbounded
//! channel; the worker POSTs the Bot API `sendMessage` endpoint. Queueing
//! never blocks the trade path and delivery failures are logged, not
//! surfaced.

use crate::error::{NotifyError, NotifyResult};
use crate::format::{format_outcome, MessageFormat};
use crate::notifier::Notifier;
use fast_core::{TradeOutcome, TradeSignal};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Default timeout for delivery requests.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API base URL. Overridable for tests; defaults to the public API.
    pub api_url: String,
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for notifications.
    pub chat_id: i64,
    /// Message rendering style.
    pub format: MessageFormat,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID`, plus an optional
    /// `TELEGRAM_API_URL` override. Returns `None` if required variables
    /// are missing or invalid, which degrades to skipped notifications.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .and_then(|s| s.parse().ok())?;

        Some(Self {
            api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            bot_token,
            chat_id,
            format: MessageFormat::default(),
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

/// `sendMessage` payload.
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

/// Telegram notifier that queues messages to a background worker.
pub struct TelegramNotifier {
    sender: mpsc::UnboundedSender<String>,
    format: MessageFormat,
}

impl TelegramNotifier {
    /// Create the notifier and spawn its delivery worker.
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let format = config.format;
        tokio::spawn(delivery_worker(config, receiver));
        Self { sender, format }
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, signal: &TradeSignal, outcome: &TradeOutcome) {
        let text = format_outcome(signal, outcome, self.format);
        if self.sender.send(text).is_err() {
            warn!("Telegram delivery worker is gone, dropping notification");
        }
    }
}

/// Background worker that delivers queued messages.
async fn delivery_worker(config: TelegramConfig, mut receiver: mpsc::UnboundedReceiver<String>) {
    let client = match reqwest::Client::builder().timeout(DELIVERY_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            error!(%e, "Failed to build notification HTTP client, notifications disabled");
            return;
        }
    };

    info!(chat_id = config.chat_id, "Telegram notifier started");

    while let Some(text) = receiver.recv().await {
        if let Err(e) = deliver(&client, &config, &text).await {
            error!(%e, "Failed to deliver Telegram notification");
        }
    }

    warn!("Telegram delivery worker shutting down");
}

/// POST one message to the Bot API.
async fn deliver(client: &reqwest::Client, config: &TelegramConfig, text: &str) -> NotifyResult<()> {
    let payload = SendMessagePayload {
        chat_id: config.chat_id,
        text,
        parse_mode: match config.format {
            MessageFormat::Plain => None,
            MessageFormat::Markup => Some("HTML"),
        },
    };

    let response = client
        .post(config.send_message_url())
        .json(&payload)
        .send()
        .await
        .map_err(|e| NotifyError::Delivery(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NotifyError::Delivery(format!("HTTP {status}: {body}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env_missing_token() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("TELEGRAM_TOKEN");
        std::env::remove_var("TELEGRAM_CHAT_ID");

        assert!(TelegramConfig::from_env().is_none());
    }

    #[test]
    fn test_from_env_invalid_chat_id() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("TELEGRAM_TOKEN", "test-token");
        std::env::set_var("TELEGRAM_CHAT_ID", "not-a-number");

        assert!(TelegramConfig::from_env().is_none());

        std::env::remove_var("TELEGRAM_TOKEN");
        std::env::remove_var("TELEGRAM_CHAT_ID");
    }

    #[test]
    fn test_from_env_valid() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("TELEGRAM_TOKEN", "test-token");
        std::env::set_var("TELEGRAM_CHAT_ID", "12345");

        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "test-token");
        assert_eq!(config.chat_id, 12345);
        assert_eq!(config.api_url, "https://api.telegram.org");

        std::env::remove_var("TELEGRAM_TOKEN");
        std::env::remove_var("TELEGRAM_CHAT_ID");
    }

    #[test]
    fn test_send_message_url() {
        let config = TelegramConfig {
            api_url: "http://127.0.0.1:8080/".to_string(),
            bot_token: "abc".to_string(),
            chat_id: 1,
            format: MessageFormat::Plain,
        };
        assert_eq!(
            config.send_message_url(),
            "http://127.0.0.1:8080/botabc/sendMessage"
        );
    }
}
