//! The opaque remote-backend capability.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Action names the provider invokes against the backend.
pub mod actions {
    pub const LIST_EVENTS: &str = "list-events";
    pub const FREE_BUSY_QUERY: &str = "free-busy-query";
    pub const CREATE_EVENT: &str = "create-event";
    pub const PATCH_EVENT: &str = "patch-event";
    pub const GET_EVENT: &str = "get-event";
    pub const DELETE_EVENT: &str = "delete-event";
    pub const GET_CURRENT_TIME: &str = "get-current-time";
}

/// Outcome of one backend invocation.
///
/// Transport failures, HTTP-level failures, and action-level failures all
/// collapse into `successful: false` with the detail in `error`. The
/// executor's classifier keys on that text, so implementations keep status
/// codes visible in it.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub successful: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    /// A successful response carrying `data`.
    pub fn success(data: Value) -> Self {
        Self {
            successful: true,
            data,
            error: None,
        }
    }

    /// A failure response carrying `message` as its error detail.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            successful: false,
            data: Value::Null,
            error: Some(message.into()),
        }
    }
}

/// A remote calendar capability addressed by action name.
///
/// How the capability authenticates is its own business; callers only ever
/// see the `{successful, data, error}` envelope.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    async fn execute(&self, action: &str, params: Value) -> ExecuteResponse;
}
