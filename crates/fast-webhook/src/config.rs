//! Application configuration.

use crate::error::{AppError, AppResult};
use fast_core::TradeDefaults;
use fast_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Trading-service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// WebSocket endpoint URL, without the app id query.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Application/client identifier.
    #[serde(default = "default_app_id")]
    pub app_id: u32,
    /// Timeout applied to every network step (seconds).
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,
}

fn default_ws_url() -> String {
    "wss://ws.binaryws.com/websockets/v3".to_string()
}

fn default_app_id() -> u32 {
    1089
}

fn default_step_timeout_secs() -> u64 {
    15
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            app_id: default_app_id(),
            step_timeout_secs: default_step_timeout_secs(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the webhook listener.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:10000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Application configuration.
///
/// Loaded once at startup and passed explicitly into constructors; secrets
/// (the service token, notification credentials) come from the environment
/// and never live in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trading-service connection settings.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Trade defaults substituted into sparse requests.
    #[serde(default)]
    pub trade: TradeDefaults,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from the given file, falling back to defaults
    /// when the file does not exist.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Build the per-session connection config with the given API token.
    pub fn session_config(&self, api_token: String) -> SessionConfig {
        SessionConfig {
            ws_url: self.service.ws_url.clone(),
            app_id: self.service.app_id,
            api_token,
            step_timeout: Duration::from_secs(self.service.step_timeout_secs),
        }
    }
}
