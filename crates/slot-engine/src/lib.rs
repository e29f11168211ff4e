//! # slot-engine
//!
//! Deterministic scheduling math for cross-timezone calendar assistants.
//!
//! Finding a meeting window in someone else's timezone is exactly the kind
//! of arithmetic that goes wrong when done casually: workday boundaries move
//! with DST, free/busy data arrives as raw UTC intervals, and "9 AM" means a
//! different instant in January than in July. This crate keeps that math
//! pure and exhaustively testable; fetching calendars and mutating events
//! live in `calendar-provider`.
//!
//! ## Modules
//!
//! - [`tz`] — wall-clock time + IANA zone → absolute instant, and back
//! - [`slots`] — free-slot search over a date range with workday bounds
//! - [`conflict`] — pairwise overlap detection across an agenda
//! - [`event`] — the normalized event record
//! - [`error`] — error types

pub mod conflict;
pub mod error;
pub mod event;
pub mod slots;
pub mod tz;

pub use conflict::{find_conflicts, Conflict};
pub use error::EngineError;
pub use event::EventSummary;
pub use slots::{find_free_slots, BusyPeriod, FreeSlot, MAX_SLOTS};
pub use tz::{instant_to_local, local_to_instant, validate_zone};
