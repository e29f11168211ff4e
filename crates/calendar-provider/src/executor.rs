//! Retrying action execution with failure classification.
//!
//! Backend failures split into two kinds: transient ones (rate limiting,
//! temporary unavailability) that a short wait usually clears, and
//! permanent ones (bad credentials, denied access) that retrying cannot
//! fix. The executor retries only the former, with exponential backoff, and
//! rewrites every failure into a stable user-facing message. Raw backend
//! text goes to the log, not the caller.

use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::backend::RemoteBackend;
use crate::error::{ProviderError, Result};

/// Total attempts per action, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Backoff base: the sleep after attempt `n` is `BASE_DELAY × 2^n`.
const BASE_DELAY: Duration = Duration::from_millis(500);

/// Classification of one backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    RateLimited,
    Unavailable,
    Unauthorized,
    Forbidden,
    Unknown,
}

impl FailureClass {
    /// Classify raw backend error text by the status-code fragments the
    /// backend embeds in its messages.
    pub fn classify(message: &str) -> Self {
        if message.contains("429") {
            Self::RateLimited
        } else if message.contains("500") || message.contains("503") {
            Self::Unavailable
        } else if message.contains("401") {
            Self::Unauthorized
        } else if message.contains("403") {
            Self::Forbidden
        } else {
            Self::Unknown
        }
    }

    /// Transient failures are worth retrying; permanent ones are not.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::RateLimited | Self::Unavailable)
    }

    fn into_error(self) -> ProviderError {
        match self {
            Self::RateLimited => ProviderError::RateLimited,
            Self::Unavailable => ProviderError::Unavailable,
            Self::Unauthorized => ProviderError::Unauthorized,
            Self::Forbidden => ProviderError::Forbidden,
            Self::Unknown => ProviderError::Unknown,
        }
    }
}

/// Invoke `action` against the backend, retrying transient failures.
///
/// Up to [`MAX_ATTEMPTS`] total attempts. A successful response returns its
/// payload immediately. Permanent failures surface at once; transient ones
/// sleep `BASE_DELAY × 2^attempt` and try again, with no sleep after the
/// final attempt. Exhausting every attempt on a transient failure surfaces
/// [`ProviderError::RetriesExhausted`], which reads differently from a
/// plain transient failure.
///
/// There is no cancellation: a caller that stops awaiting does not stop an
/// in-flight retry loop from running to its natural end.
pub async fn execute(backend: &dyn RemoteBackend, action: &str, params: Value) -> Result<Value> {
    for attempt in 0..MAX_ATTEMPTS {
        debug!(action, attempt, "executing backend action");
        let response = backend.execute(action, params.clone()).await;

        if response.successful {
            return Ok(response.data);
        }

        let raw = response
            .error
            .unwrap_or_else(|| "backend reported failure without detail".to_string());
        let class = FailureClass::classify(&raw);
        warn!(action, attempt, ?class, error = %raw, "backend action failed");

        if !class.is_transient() {
            return Err(class.into_error());
        }
        if attempt + 1 < MAX_ATTEMPTS {
            sleep(BASE_DELAY * 2u32.pow(attempt)).await;
        }
    }

    Err(ProviderError::RetriesExhausted {
        attempts: MAX_ATTEMPTS,
    })
}
