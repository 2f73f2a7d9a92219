use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NodeError;

/// Destination for JSON readings leaving the node.
#[async_trait]
pub trait Uplink: Send + Sync {
    async fn ping(&self, payload: &Value) -> Result<(), NodeError>;
}

pub struct WebClient {
    http_client: reqwest::Client,
    server_url: String,
}

impl WebClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, NodeError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            server_url: server_url.to_string(),
        })
    }

    pub async fn ping_lan_server(&self, payload: &Value) -> Result<(), NodeError> {
        let response = self
            .http_client
            .post(&self.server_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::Status {
                url: self.server_url.clone(),
                status: status.as_u16(),
            });
        }

        tracing::debug!("delivered payload to {} ({})", self.server_url, status);

        Ok(())
    }
}

#[async_trait]
impl Uplink for WebClient {
    async fn ping(&self, payload: &Value) -> Result<(), NodeError> {
        self.ping_lan_server(payload).await
    }
}
