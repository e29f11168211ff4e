//! Error types for provider operations.
//!
//! Remote failures surface as a small, stable taxonomy with user-facing
//! messages; the raw backend text is logged by the executor and never
//! reaches the caller. Validation problems found at preview time are
//! advisory warning strings, not errors; the engine only raises a hard
//! `Validation` error where computation cannot proceed at all.

use slot_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Calendar access is not authorized. Reconnect the calendar account and try again.")]
    Unauthorized,

    #[error("The calendar account does not have permission for this operation.")]
    Forbidden,

    #[error("The calendar service is rate limiting requests. Wait a moment and try again.")]
    RateLimited,

    #[error("The calendar service is temporarily unavailable. Try again shortly.")]
    Unavailable,

    #[error("The calendar service returned an unexpected error. Reconnect the account if the problem persists.")]
    Unknown,

    #[error("The calendar service kept failing after {attempts} attempts. Try again later.")]
    RetriesExhausted { attempts: u32 },

    #[error(transparent)]
    Validation(#[from] EngineError),

    #[error("The calendar service response could not be interpreted: {0}")]
    BadResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
