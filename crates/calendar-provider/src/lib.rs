//! # calendar-provider
//!
//! The impure half of the scheduling core: a retrying, error-classifying
//! executor over an opaque remote calendar backend, event-shape
//! normalization, and the preview/confirm protocol for mutations. The pure
//! scheduling math lives in `slot-engine`; the HTTP surface on top of this
//! crate is thin glue.
//!
//! Every operation is single-flight and request-scoped: it runs 0–3
//! sequential backend calls to completion and holds no shared mutable state
//! beyond the lazily-constructed backend client handle.
//!
//! ## Modules
//!
//! - [`provider`] — the operation facade the HTTP surface calls
//! - [`executor`] — retry loop with exponential backoff and failure classification
//! - [`backend`] — the remote capability trait and response envelope
//! - [`composio`] — reqwest client for the hosted action API
//! - [`events`] — backend event/busy shape normalization
//! - [`preview`] — pure mutation previews with advisory warnings
//! - [`config`] — environment-driven backend configuration
//! - [`error`] — error types

pub mod backend;
pub mod composio;
pub mod config;
pub mod error;
pub mod events;
pub mod executor;
pub mod preview;
pub mod provider;

pub use backend::{ExecuteResponse, RemoteBackend};
pub use error::ProviderError;
pub use preview::{ActionKind, ActionPreview, CreateEventParams, UpdateEventParams};
pub use provider::{CalendarProvider, ConnectionStatus, FindFreeSlotsParams};
