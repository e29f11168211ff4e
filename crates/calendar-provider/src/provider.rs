//! The provider facade: every calendar operation the HTTP surface exposes.
//!
//! Each operation runs 0–3 sequential backend calls through the executor
//! and returns wire-ready records. Reads (list, free/busy, conflicts) and
//! previews never mutate remote state; the confirm methods and
//! [`CalendarProvider::delete_event`] are the only mutating steps.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use slot_engine::{self as engine, Conflict, EngineError, EventSummary, FreeSlot};

use crate::backend::{actions, RemoteBackend};
use crate::composio::ComposioBackend;
use crate::error::{ProviderError, Result};
use crate::events;
use crate::executor;
use crate::preview::{self, ActionPreview, CreateEventParams, UpdateEventParams};

/// Result of a connection probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    pub last_checked: DateTime<Utc>,
}

/// Parameters for a free-slot search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindFreeSlotsParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_minutes: i64,
    pub workday_start_hour: u32,
    pub workday_end_hour: u32,
    pub timezone: String,
}

/// All calendar operations, bound to one backend capability.
pub struct CalendarProvider {
    backend: Arc<dyn RemoteBackend>,
}

impl CalendarProvider {
    pub fn new(backend: Arc<dyn RemoteBackend>) -> Self {
        Self { backend }
    }

    /// The process-wide provider over the environment-configured backend.
    ///
    /// Constructed on first use and reused for the life of the process; the
    /// backend client is stateless per call, so there is nothing to tear
    /// down and no reason to rebuild it mid-flight.
    pub fn shared() -> Result<&'static CalendarProvider> {
        static SHARED: OnceLock<CalendarProvider> = OnceLock::new();
        if let Some(provider) = SHARED.get() {
            return Ok(provider);
        }
        let provider = CalendarProvider::new(Arc::new(ComposioBackend::from_env()?));
        Ok(SHARED.get_or_init(|| provider))
    }

    /// Probe the backend. Failures mean "not connected", never an error.
    pub async fn check_connection(&self) -> ConnectionStatus {
        let connected =
            executor::execute(self.backend.as_ref(), actions::GET_CURRENT_TIME, json!({}))
                .await
                .is_ok();
        ConnectionStatus {
            connected,
            last_checked: Utc::now(),
        }
    }

    /// List events within `[time_min, time_max]`, normalized.
    pub async fn list_events(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>> {
        let data = executor::execute(
            self.backend.as_ref(),
            actions::LIST_EVENTS,
            json!({
                "timeMin": time_min,
                "timeMax": time_max,
                "singleEvents": true,
                "orderBy": "startTime",
            }),
        )
        .await?;
        events::normalize_events(&data)
    }

    /// Fetch free/busy data for the requested range and run the slot search.
    pub async fn find_free_slots(&self, params: &FindFreeSlotsParams) -> Result<Vec<FreeSlot>> {
        // The query window spans the whole range in the caller's zone so
        // the fetch covers every workday the search will walk.
        let window_start = engine::local_to_instant(
            params.start_date.and_time(NaiveTime::MIN),
            &params.timezone,
        )?;
        let day_after_end = params.end_date.succ_opt().ok_or_else(|| {
            ProviderError::Validation(EngineError::InvalidRange(
                "date range end is out of bounds".to_string(),
            ))
        })?;
        let window_end =
            engine::local_to_instant(day_after_end.and_time(NaiveTime::MIN), &params.timezone)?;

        let data = executor::execute(
            self.backend.as_ref(),
            actions::FREE_BUSY_QUERY,
            json!({
                "timeMin": window_start,
                "timeMax": window_end,
                "items": [{ "id": "primary" }],
            }),
        )
        .await?;
        let busy = events::normalize_busy(&data)?;

        let slots = engine::find_free_slots(
            params.start_date,
            params.end_date,
            params.duration_minutes,
            params.workday_start_hour,
            params.workday_end_hour,
            &params.timezone,
            &busy,
        )?;
        info!(count = slots.len(), "free-slot search complete");
        Ok(slots)
    }

    /// Fetch the agenda for the range and report overlapping pairs.
    pub async fn find_conflicts(
        &self,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<Conflict>> {
        let agenda = self.list_events(time_min, time_max).await?;
        Ok(engine::find_conflicts(&agenda))
    }

    /// Pure dry run of a create; no remote effect.
    pub fn preview_create_event(&self, params: &CreateEventParams) -> ActionPreview {
        preview::preview_create(params)
    }

    /// Execute the create and return the normalized result. Warnings are
    /// preview-time advice only; confirm does not re-validate.
    pub async fn confirm_create_event(&self, params: &CreateEventParams) -> Result<EventSummary> {
        let data = executor::execute(
            self.backend.as_ref(),
            actions::CREATE_EVENT,
            create_payload(params),
        )
        .await?;
        events::normalize_event(data)
    }

    /// Dry run of an update: one `get-event` fetch for the `before`
    /// snapshot, then a pure merge.
    pub async fn preview_update_event(
        &self,
        event_id: &str,
        params: &UpdateEventParams,
    ) -> Result<ActionPreview> {
        let before = self.get_event(event_id).await?;
        Ok(preview::preview_update(&before, params))
    }

    /// Execute the update and return the normalized result.
    pub async fn confirm_update_event(
        &self,
        event_id: &str,
        params: &UpdateEventParams,
    ) -> Result<EventSummary> {
        let data = executor::execute(
            self.backend.as_ref(),
            actions::PATCH_EVENT,
            patch_payload(event_id, params),
        )
        .await?;
        events::normalize_event(data)
    }

    /// Remove an event. The literal confirmation phrase guarding deletes is
    /// checked at the boundary, before this call.
    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        executor::execute(
            self.backend.as_ref(),
            actions::DELETE_EVENT,
            json!({ "eventId": event_id }),
        )
        .await?;
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> Result<EventSummary> {
        let data = executor::execute(
            self.backend.as_ref(),
            actions::GET_EVENT,
            json!({ "eventId": event_id }),
        )
        .await?;
        events::normalize_event(data)
    }
}

fn create_payload(params: &CreateEventParams) -> Value {
    let mut payload = json!({
        "summary": params.summary,
        "start": { "dateTime": params.start, "timeZone": params.timezone },
        "end": { "dateTime": params.end, "timeZone": params.timezone },
    });
    if let Some(description) = &params.description {
        payload["description"] = json!(description);
    }
    if let Some(location) = &params.location {
        payload["location"] = json!(location);
    }
    if !params.attendees.is_empty() {
        payload["attendees"] = params
            .attendees
            .iter()
            .map(|email| json!({ "email": email }))
            .collect();
    }
    payload
}

fn patch_payload(event_id: &str, params: &UpdateEventParams) -> Value {
    let mut payload = json!({ "eventId": event_id });
    if let Some(summary) = &params.summary {
        payload["summary"] = json!(summary);
    }
    if let Some(description) = &params.description {
        payload["description"] = json!(description);
    }
    if let Some(location) = &params.location {
        payload["location"] = json!(location);
    }
    if let Some(attendees) = &params.attendees {
        payload["attendees"] = attendees
            .iter()
            .map(|email| json!({ "email": email }))
            .collect();
    }
    let zone = params.timezone.as_deref();
    if let Some(start) = params.start {
        payload["start"] = time_field(start, zone);
    }
    if let Some(end) = params.end {
        payload["end"] = time_field(end, zone);
    }
    payload
}

fn time_field(wall: NaiveDateTime, zone: Option<&str>) -> Value {
    match zone {
        Some(zone) => json!({ "dateTime": wall, "timeZone": zone }),
        None => json!({ "dateTime": wall }),
    }
}
