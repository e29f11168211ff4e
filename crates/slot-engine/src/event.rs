//! The normalized calendar event record shared across the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event reduced to the fields scheduling cares about.
///
/// Heterogeneous backend shapes (timed `dateTime` vs all-day `date`) are
/// flattened into absolute instants before this record is built, so `start`
/// and `end` always serialize as ISO-8601 UTC. Missing titles are filled
/// with a literal placeholder at normalization time, never left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendees_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
}
