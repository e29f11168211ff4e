//! The preview half of the preview/confirm mutation protocol.
//!
//! Previews are pure: they compute what a mutation would do and attach
//! advisory warnings. Nothing here touches the backend, and warnings never
//! block the confirm step; whether to proceed despite them is the caller's
//! decision.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use slot_engine::{validate_zone, EventSummary};

/// Warning attached when a mutation's end would not come after its start.
pub const WARN_END_NOT_AFTER_START: &str = "End time is not after start time.";

/// What kind of mutation a preview describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

/// A dry-run description of a mutation: the prospective result plus any
/// advisory warnings. `before` is present for updates only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPreview {
    pub action_type: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    pub after: Value,
    pub warnings: Vec<String>,
}

/// Caller-supplied fields for creating an event. `start` and `end` are
/// wall-clock readings in `timezone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventParams {
    pub summary: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
}

/// Caller-supplied fields for updating an event; only supplied fields are
/// written over the current state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
}

/// Describe what creating this event would produce.
pub fn preview_create(params: &CreateEventParams) -> ActionPreview {
    let mut warnings = Vec::new();
    if params.end <= params.start {
        warnings.push(WARN_END_NOT_AFTER_START.to_string());
    }
    if let Err(err) = validate_zone(&params.timezone) {
        warnings.push(err.to_string());
    }

    ActionPreview {
        action_type: ActionKind::Create,
        before: None,
        after: json!({
            "summary": params.summary,
            "start": params.start,
            "end": params.end,
            "timezone": params.timezone,
            "description": params.description,
            "location": params.location,
            "attendees": params.attendees,
        }),
        warnings,
    }
}

/// Describe what updating `before` with `params` would produce.
///
/// The caller supplies `before` from a fresh fetch; the merge itself is
/// pure. Time-ordering and timezone warnings are only raised when the
/// relevant fields were actually supplied.
pub fn preview_update(before: &EventSummary, params: &UpdateEventParams) -> ActionPreview {
    let mut warnings = Vec::new();
    if let (Some(start), Some(end)) = (params.start, params.end) {
        if end <= start {
            warnings.push(WARN_END_NOT_AFTER_START.to_string());
        }
    }
    if let Some(zone) = &params.timezone {
        if let Err(err) = validate_zone(zone) {
            warnings.push(err.to_string());
        }
    }

    let after = json!({
        "id": before.id,
        "summary": params.summary.clone().unwrap_or_else(|| before.summary.clone()),
        "start": merge_time(params.start, before.start),
        "end": merge_time(params.end, before.end),
        "timezone": params.timezone,
        "description": params.description,
        "location": params.location.clone().or_else(|| before.location.clone()),
        "attendees": params.attendees,
    });

    ActionPreview {
        action_type: ActionKind::Update,
        before: serde_json::to_value(before).ok(),
        after,
        warnings,
    }
}

// Supplied fields stay wall-clock in the snapshot; untouched fields keep
// the stored UTC instant.
fn merge_time(supplied: Option<NaiveDateTime>, current: DateTime<Utc>) -> Value {
    match supplied {
        Some(wall) => json!(wall),
        None => json!(current),
    }
}
