//! Error types for scheduling-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" is a timezone abbreviation. Use an IANA zone like America/New_York")]
    TimezoneAbbreviation(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
