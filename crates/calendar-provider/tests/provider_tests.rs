//! End-to-end provider tests against a scripted in-memory backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use calendar_provider::backend::{actions, ExecuteResponse, RemoteBackend};
use calendar_provider::error::ProviderError;
use calendar_provider::preview::{CreateEventParams, UpdateEventParams};
use calendar_provider::provider::{CalendarProvider, FindFreeSlotsParams};

/// Backend that replays a fixed script of responses and records every call.
struct ScriptedBackend {
    responses: Mutex<VecDeque<ExecuteResponse>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedBackend {
    fn new(responses: Vec<ExecuteResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteBackend for ScriptedBackend {
    async fn execute(&self, action: &str, params: Value) -> ExecuteResponse {
        self.calls.lock().unwrap().push((action.to_string(), params));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ExecuteResponse::failure("script exhausted"))
    }
}

fn timed_event(id: &str, summary: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "summary": summary,
        "start": { "dateTime": start },
        "end": { "dateTime": end }
    })
}

#[tokio::test]
async fn find_free_slots_round_trip() {
    // Busy 10:00-11:00 New York local on 2024-01-15 (EST, UTC-5) arrives
    // from the free/busy query as 15:00-16:00Z; a 30-minute request should
    // land 09:00 and 11:00 local.
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(json!({
        "calendars": {
            "primary": {
                "busy": [{ "start": "2024-01-15T15:00:00Z", "end": "2024-01-15T16:00:00Z" }]
            }
        }
    }))]);
    let provider = CalendarProvider::new(backend.clone());

    let slots = provider
        .find_free_slots(&FindFreeSlotsParams {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            duration_minutes: 30,
            workday_start_hour: 9,
            workday_end_hour: 17,
            timezone: "America/New_York".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start, Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap());
    assert_eq!(slots[1].start, Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 0).unwrap());

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, actions::FREE_BUSY_QUERY);
    assert_eq!(calls[0].1["items"], json!([{ "id": "primary" }]));
}

#[tokio::test]
async fn find_free_slots_rejects_abbreviation_before_fetch() {
    let backend = ScriptedBackend::new(vec![]);
    let provider = CalendarProvider::new(backend.clone());

    let err = provider
        .find_free_slots(&FindFreeSlotsParams {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            duration_minutes: 30,
            workday_start_hour: 9,
            workday_end_hour: 17,
            timezone: "EST".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Validation(_)));
    assert!(backend.calls().is_empty(), "no backend call for an invalid zone");
}

#[tokio::test]
async fn find_conflicts_reports_overlapping_pair() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(json!({
        "items": [
            timed_event("a", "Standup", "2024-01-15T10:00:00Z", "2024-01-15T11:00:00Z"),
            timed_event("b", "1:1", "2024-01-15T10:30:00Z", "2024-01-15T11:30:00Z")
        ]
    }))]);
    let provider = CalendarProvider::new(backend.clone());

    let conflicts = provider
        .find_conflicts(
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].event_a.id, "a");
    assert_eq!(conflicts[0].event_b.id, "b");
    assert_eq!(conflicts[0].overlap_minutes, 30);

    let calls = backend.calls();
    assert_eq!(calls[0].0, actions::LIST_EVENTS);
    assert_eq!(calls[0].1["singleEvents"], json!(true));
}

#[tokio::test]
async fn list_events_error_propagates_rewritten() {
    let backend =
        ScriptedBackend::new(vec![ExecuteResponse::failure("HTTP 403 Forbidden")]);
    let provider = CalendarProvider::new(backend);

    let err = provider
        .list_events(
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Forbidden));
    assert!(!err.to_string().contains("HTTP"), "raw backend text must not surface");
}

#[tokio::test]
async fn confirm_create_sends_payload_and_normalizes_result() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(timed_event(
        "evt-9",
        "Planning sync",
        "2024-01-15T10:00:00-05:00",
        "2024-01-15T11:00:00-05:00",
    ))]);
    let provider = CalendarProvider::new(backend.clone());

    let params = CreateEventParams {
        summary: "Planning sync".to_string(),
        start: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 0, 0).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(11, 0, 0).unwrap(),
        timezone: "America/New_York".to_string(),
        description: None,
        location: None,
        attendees: vec!["a@example.com".to_string()],
    };
    let event = provider.confirm_create_event(&params).await.unwrap();

    assert_eq!(event.id, "evt-9");
    assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).unwrap());

    let calls = backend.calls();
    assert_eq!(calls[0].0, actions::CREATE_EVENT);
    assert_eq!(calls[0].1["start"]["timeZone"], json!("America/New_York"));
    assert_eq!(calls[0].1["attendees"], json!([{ "email": "a@example.com" }]));
    assert!(calls[0].1.get("description").is_none());
}

#[tokio::test]
async fn preview_update_fetches_before_snapshot() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(timed_event(
        "evt-1",
        "Planning sync",
        "2024-01-15T15:00:00Z",
        "2024-01-15T16:00:00Z",
    ))]);
    let provider = CalendarProvider::new(backend.clone());

    let params = UpdateEventParams {
        summary: Some("Planning sync (moved)".to_string()),
        ..Default::default()
    };
    let preview = provider.preview_update_event("evt-1", &params).await.unwrap();

    assert!(preview.before.is_some());
    assert_eq!(preview.after["summary"], json!("Planning sync (moved)"));

    let calls = backend.calls();
    assert_eq!(calls.len(), 1, "preview must make exactly one read call");
    assert_eq!(calls[0].0, actions::GET_EVENT);
    assert_eq!(calls[0].1["eventId"], json!("evt-1"));
}

#[tokio::test]
async fn confirm_update_patches_only_supplied_fields() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(timed_event(
        "evt-1",
        "Planning sync (moved)",
        "2024-01-15T16:00:00Z",
        "2024-01-15T17:00:00Z",
    ))]);
    let provider = CalendarProvider::new(backend.clone());

    let params = UpdateEventParams {
        summary: Some("Planning sync (moved)".to_string()),
        ..Default::default()
    };
    let event = provider.confirm_update_event("evt-1", &params).await.unwrap();

    assert_eq!(event.summary, "Planning sync (moved)");

    let calls = backend.calls();
    assert_eq!(calls[0].0, actions::PATCH_EVENT);
    assert_eq!(calls[0].1["summary"], json!("Planning sync (moved)"));
    assert!(calls[0].1.get("start").is_none(), "unsupplied fields stay untouched");
}

#[tokio::test]
async fn delete_event_invokes_backend_once() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(json!({}))]);
    let provider = CalendarProvider::new(backend.clone());

    provider.delete_event("evt-1").await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, actions::DELETE_EVENT);
    assert_eq!(calls[0].1["eventId"], json!("evt-1"));
}

#[tokio::test]
async fn check_connection_reports_connected_on_success() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::success(json!({
        "currentTime": "2024-01-15T12:00:00Z"
    }))]);
    let provider = CalendarProvider::new(backend.clone());

    let status = provider.check_connection().await;

    assert!(status.connected);
    assert_eq!(backend.calls()[0].0, actions::GET_CURRENT_TIME);
}

#[tokio::test]
async fn check_connection_swallows_failure_as_disconnected() {
    let backend = ScriptedBackend::new(vec![ExecuteResponse::failure("HTTP 401 Unauthorized")]);
    let provider = CalendarProvider::new(backend);

    let status = provider.check_connection().await;

    assert!(!status.connected);
}
