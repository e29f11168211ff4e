//! Normalization of backend event shapes.
//!
//! The backend returns two event time shapes: timed events carry a
//! `dateTime` with an offset, all-day events carry a bare `date`. Both are
//! modeled as one tagged union rather than optional-field guessing, and
//! everything downstream of this module sees absolute instants only.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use slot_engine::{BusyPeriod, EventSummary};

use crate::error::{ProviderError, Result};

/// Placeholder title for events the backend returns without a summary.
pub const UNTITLED: &str = "(No title)";

/// Start or end of a backend event. Variant order gives `dateTime` stable
/// precedence when a payload carries both fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Timed {
        #[serde(rename = "dateTime")]
        date_time: DateTime<FixedOffset>,
    },
    AllDay {
        date: NaiveDate,
    },
}

impl EventTime {
    /// Collapse to an absolute instant; all-day dates pin to midnight UTC.
    pub fn to_instant(&self) -> DateTime<Utc> {
        match self {
            Self::Timed { date_time } => date_time.with_timezone(&Utc),
            Self::AllDay { date } => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    summary: Option<String>,
    start: EventTime,
    end: EventTime,
    #[serde(default)]
    attendees: Vec<Value>,
    location: Option<String>,
    #[serde(rename = "hangoutLink")]
    hangout_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBusy {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

/// Normalize one backend event payload into the engine's record.
///
/// # Errors
///
/// Returns `ProviderError::BadResponse` when the payload does not match
/// either known event shape.
pub fn normalize_event(value: Value) -> Result<EventSummary> {
    let raw: RawEvent = serde_json::from_value(value)
        .map_err(|err| ProviderError::BadResponse(format!("event shape: {err}")))?;

    Ok(EventSummary {
        id: raw.id,
        summary: raw
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
        start: raw.start.to_instant(),
        end: raw.end.to_instant(),
        attendees_count: raw.attendees.len(),
        location: raw.location,
        meet_link: raw.hangout_link,
    })
}

/// Normalize a list-events payload. The array lives under `items` (the
/// upstream calendar shape) or `events`; a bare array also works.
pub fn normalize_events(data: &Value) -> Result<Vec<EventSummary>> {
    let items = data
        .get("items")
        .or_else(|| data.get("events"))
        .unwrap_or(data)
        .as_array()
        .ok_or_else(|| ProviderError::BadResponse("expected an event array".to_string()))?;

    items.iter().cloned().map(normalize_event).collect()
}

/// Extract busy periods from a free/busy payload, start-ascending.
///
/// The slot finder's early exit depends on the ordering, so it is
/// established here at the boundary rather than trusted from the backend.
pub fn normalize_busy(data: &Value) -> Result<Vec<BusyPeriod>> {
    let mut periods = Vec::new();

    if let Some(calendars) = data.get("calendars").and_then(Value::as_object) {
        for calendar in calendars.values() {
            collect_busy(calendar.get("busy"), &mut periods)?;
        }
    } else {
        collect_busy(data.get("busy"), &mut periods)?;
    }

    periods.sort_by_key(|p| (p.start, p.end));
    Ok(periods)
}

fn collect_busy(value: Option<&Value>, out: &mut Vec<BusyPeriod>) -> Result<()> {
    let Some(array) = value.and_then(Value::as_array) else {
        return Ok(());
    };
    for entry in array {
        let raw: RawBusy = serde_json::from_value(entry.clone())
            .map_err(|err| ProviderError::BadResponse(format!("busy period shape: {err}")))?;
        out.push(BusyPeriod {
            start: raw.start.with_timezone(&Utc),
            end: raw.end.with_timezone(&Utc),
        });
    }
    Ok(())
}
