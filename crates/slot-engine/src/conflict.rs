//! Pairwise overlap detection across a fetched agenda.
//!
//! Adjacent events (where one ends exactly when another starts) are NOT
//! conflicts.

use serde::{Deserialize, Serialize};

use crate::event::EventSummary;

/// A pair of events whose time ranges intersect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub event_a: EventSummary,
    pub event_b: EventSummary,
    pub overlap_minutes: i64,
}

/// Find every overlapping pair in `events`.
///
/// Each unordered pair (i < j) is compared once, and results follow
/// enumeration order. Two events overlap when `a.start < b.end && b.start <
/// a.end`, which excludes the adjacent case where `a.end == b.start`. The
/// overlap is `min(a.end, b.end) - max(a.start, b.start)`, reported rounded
/// to the nearest whole minute.
///
/// Quadratic in the number of events, which is fine for a date-range agenda.
pub fn find_conflicts(events: &[EventSummary]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.start < b.end && b.start < a.end {
                let overlap = a.end.min(b.end) - a.start.max(b.start);
                conflicts.push(Conflict {
                    event_a: a.clone(),
                    event_b: b.clone(),
                    overlap_minutes: round_to_minutes(overlap),
                });
            }
        }
    }

    conflicts
}

fn round_to_minutes(delta: chrono::Duration) -> i64 {
    (delta.num_seconds() + 30) / 60
}
