//! HTTP client for the hosted action backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::backend::{ExecuteResponse, RemoteBackend};
use crate::config::BackendConfig;
use crate::error::Result;

/// Backend implementation speaking the hosted action-execution API.
///
/// The reqwest client pools connections internally; one instance is built
/// per backend and reused for the life of the process. No timeout is
/// applied here, so whatever the transport enforces is inherited.
pub struct ComposioBackend {
    client: Client,
    config: BackendConfig,
}

impl ComposioBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Construct from environment configuration.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BackendConfig::load()?))
    }

    fn action_url(&self, action: &str) -> String {
        format!(
            "{}/actions/{}/execute",
            self.config.base_url.trim_end_matches('/'),
            action
        )
    }
}

#[async_trait]
impl RemoteBackend for ComposioBackend {
    async fn execute(&self, action: &str, params: Value) -> ExecuteResponse {
        let body = json!({
            "connectedAccountId": self.config.connected_account_id,
            "input": params,
        });

        debug!(action, "dispatching backend action");
        let request = self
            .client
            .post(self.action_url(action))
            .header("x-api-key", &self.config.api_key)
            .json(&body);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return ExecuteResponse::failure(format!("request failed: {err}")),
        };

        // Keep the status code in the error text; the executor's classifier
        // reads it from there.
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return ExecuteResponse::failure(format!("HTTP {status}: {detail}"));
        }

        match response.json::<ExecuteResponse>().await {
            Ok(parsed) => parsed,
            Err(err) => ExecuteResponse::failure(format!("unreadable response body: {err}")),
        }
    }
}
