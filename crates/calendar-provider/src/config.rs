//! Environment-driven backend configuration.

use std::env;

use dotenvy::dotenv;

use crate::error::{ProviderError, Result};

/// Default API root for the hosted action backend.
pub const DEFAULT_BASE_URL: &str = "https://backend.composio.dev/api/v2";

/// Connection settings for the remote action backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// API key presented on every request.
    pub api_key: String,
    /// API root; overridable for self-hosted deployments and tests.
    pub base_url: String,
    /// Connected calendar account the actions run against.
    pub connected_account_id: String,
}

impl BackendConfig {
    /// Load configuration from the environment (and `.env` if present).
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let api_key = env::var("COMPOSIO_API_KEY").map_err(|_| missing("COMPOSIO_API_KEY"))?;
        let connected_account_id =
            env::var("COMPOSIO_ACCOUNT_ID").map_err(|_| missing("COMPOSIO_ACCOUNT_ID"))?;
        let base_url =
            env::var("COMPOSIO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url,
            connected_account_id,
        })
    }
}

fn missing(var: &str) -> ProviderError {
    ProviderError::Config(format!("missing environment variable {var}"))
}
