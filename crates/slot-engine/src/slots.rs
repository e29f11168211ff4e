//! Free-slot search across a date range with per-day workday bounds.
//!
//! Day boundaries are computed in the caller's timezone, so a 09:00–17:00
//! workday means 09:00–17:00 *in that zone* on every day of the range, with
//! the UTC boundaries shifting at DST transitions. Each emitted slot is
//! exactly the requested meeting length, anchored at the earliest open
//! cursor position, never the whole gap.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::tz;

/// Upper bound on the number of slots returned by a single search.
pub const MAX_SLOTS: usize = 5;

/// An interval during which the calendar owner is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// An open window of exactly the requested meeting length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Find up to [`MAX_SLOTS`] open windows of `duration_minutes` between
/// `start_date` and `end_date` inclusive, within `workday_start_hour`–
/// `workday_end_hour` of each day in `zone`, avoiding `busy`.
///
/// `busy` may arrive in any order; it is sorted start-ascending internally,
/// which is what lets the per-day walk stop as soon as a period starts at or
/// beyond the day's end. Busy periods spanning midnight are evaluated again
/// on each day they touch; the cursor never carries over between days.
///
/// # Errors
///
/// Returns `EngineError::InvalidRange` for a nonpositive duration or
/// out-of-range workday hours, and timezone errors from [`tz::validate_zone`].
pub fn find_free_slots(
    start_date: NaiveDate,
    end_date: NaiveDate,
    duration_minutes: i64,
    workday_start_hour: u32,
    workday_end_hour: u32,
    zone: &str,
    busy: &[BusyPeriod],
) -> Result<Vec<FreeSlot>> {
    if duration_minutes <= 0 {
        return Err(EngineError::InvalidRange(format!(
            "meeting duration must be positive, got {duration_minutes}"
        )));
    }
    if workday_start_hour > 23 || workday_end_hour > 23 {
        return Err(EngineError::InvalidRange(format!(
            "workday hours must be within 0-23, got {workday_start_hour}-{workday_end_hour}"
        )));
    }

    let mut busy: Vec<BusyPeriod> = busy.to_vec();
    busy.sort_by_key(|p| (p.start, p.end));

    let duration = Duration::minutes(duration_minutes);
    let mut slots = Vec::new();

    let mut day = start_date;
    while day <= end_date && slots.len() < MAX_SLOTS {
        let day_start = day_instant(day, workday_start_hour, zone)?;
        let day_end = day_instant(day, workday_end_hour, zone)?;

        let mut cursor = day_start;
        for period in &busy {
            // Ends at or before the cursor: cannot shrink any remaining gap.
            if period.end <= cursor {
                continue;
            }
            // Sorted input: nothing past this period can matter today.
            if period.start >= day_end {
                break;
            }
            if period.start - cursor >= duration {
                slots.push(slot_at(cursor, duration, duration_minutes));
                if slots.len() == MAX_SLOTS {
                    return Ok(slots);
                }
            }
            if period.end > cursor {
                cursor = period.end;
            }
        }

        // Trailing gap between the last busy period and the end of the day.
        if day_end - cursor >= duration {
            slots.push(slot_at(cursor, duration, duration_minutes));
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(slots)
}

fn day_instant(day: NaiveDate, hour: u32, zone: &str) -> Result<DateTime<Utc>> {
    let local = day
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| EngineError::InvalidRange(format!("invalid workday hour {hour}")))?;
    tz::local_to_instant(local, zone)
}

fn slot_at(start: DateTime<Utc>, duration: Duration, duration_minutes: i64) -> FreeSlot {
    FreeSlot {
        start,
        end: start + duration,
        duration_minutes,
    }
}
