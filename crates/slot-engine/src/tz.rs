//! Wall-clock ⇄ instant conversion through IANA timezones.
//!
//! A wall-clock time ("2024-01-15 09:00") paired with an IANA zone denotes
//! one instant, except at DST edges. The zone's offset depends on the
//! calendar date (standard vs daylight time), so resolution goes through
//! the tz database rather than a fixed offset, and the two edge cases have
//! an explicit policy:
//!
//! - fall-back fold (the hour that happens twice): the earlier offset wins
//! - spring-forward gap (the hour that never happens): shift forward 1 hour
//!
//! Bare offset abbreviations ("EST", "PST") are rejected outright. Several
//! of them are valid tz-database entries that pin a fixed, DST-blind
//! offset, so the abbreviation check runs before the database lookup.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};

/// Parse and validate an IANA zone identifier.
///
/// # Errors
///
/// Returns `EngineError::TimezoneAbbreviation` for 2–5 letter all-caps
/// identifiers, and `EngineError::InvalidTimezone` for anything the tz
/// database does not know. Note the abbreviation rule also refuses the
/// literal "UTC"; callers wanting UTC pass "Etc/UTC".
pub fn validate_zone(zone: &str) -> Result<Tz> {
    if is_abbreviation(zone) {
        return Err(EngineError::TimezoneAbbreviation(zone.to_string()));
    }
    zone.parse()
        .map_err(|_| EngineError::InvalidTimezone(zone.to_string()))
}

fn is_abbreviation(zone: &str) -> bool {
    (2..=5).contains(&zone.len()) && zone.chars().all(|c| c.is_ascii_uppercase())
}

/// Resolve a wall-clock time in `zone` to the absolute instant it denotes.
///
/// # Errors
///
/// Returns an error when the zone is rejected by [`validate_zone`], or when
/// the wall-clock time cannot be resolved even after the gap shift (which
/// does not happen for tz-database zones in practice).
pub fn local_to_instant(local: NaiveDateTime, zone: &str) -> Result<DateTime<Utc>> {
    let tz = validate_zone(zone)?;
    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        // The wall-clock reading fell in a spring-forward gap; the same
        // reading one hour later is on the far side of the transition.
        LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest(),
    };
    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| EngineError::InvalidRange(format!("{local} cannot be resolved in {zone}")))
}

/// Format an instant as the wall-clock time it displays in `zone`.
///
/// Inverse of [`local_to_instant`] everywhere outside the DST fold (where
/// two instants share one wall-clock reading).
pub fn instant_to_local(instant: DateTime<Utc>, zone: &str) -> Result<NaiveDateTime> {
    let tz = validate_zone(zone)?;
    Ok(instant.with_timezone(&tz).naive_local())
}
