use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NodeError;
use crate::retry::RetryPolicy;

pub const HARDWARE_TYPE: &str = "HARDWARE_TYPE";
pub const SERVER_API_ENDPOINT: &str = "DJANGO_SERVER_API_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanServer {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pacing {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retry {
    pub attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialLink {
    pub port_path: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gps {
    pub port_path: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
    pub sensor_id: i32,
    pub max_sentences: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub lan_server: LanServer,
    pub client: Client,
    pub pacing: Pacing,
    pub retry: Retry,
    pub transceiver: SerialLink,
    pub gps: Gps,
    /// Upstream data service for the generic relay
    #[serde(default)]
    pub server_api_endpoint: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, NodeError> {
        let mut settings = Self::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/node.toml"
        )))?;

        if let Ok(endpoint) = env::var(SERVER_API_ENDPOINT) {
            settings.server_api_endpoint = Some(endpoint).filter(|e| !e.trim().is_empty());
        }

        Ok(settings)
    }

    pub fn from_toml(source: &str) -> Result<Self, NodeError> {
        let mut settings: Settings =
            toml::from_str(source).map_err(|e| NodeError::Config(e.to_string()))?;

        // An empty endpoint counts as unset
        settings.server_api_endpoint = settings
            .server_api_endpoint
            .filter(|endpoint| !endpoint.trim().is_empty());

        Ok(settings)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.pacing.interval_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry.attempts.max(1),
            initial_backoff: Duration::from_millis(self.retry.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.retry.max_backoff_ms),
        }
    }
}
