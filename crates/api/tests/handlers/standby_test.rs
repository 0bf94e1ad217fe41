use axum::http::StatusCode;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use standby_core::models::assignment::{
    AssignmentWindow, CurrentStandbyResponse, OnCallHoursResponse,
};

use crate::test_utils::TestContext;

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, d, h, 0, 0).unwrap()
}

async fn create_window(
    ctx: &TestContext,
    person_id: &str,
    date: &str,
    kind: &str,
) -> AssignmentWindow {
    let response = ctx
        .server
        .post("/api/standby/windows")
        .json(&json!({ "person_id": person_id, "date": date, "kind": kind }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<AssignmentWindow>()
}

#[tokio::test]
async fn test_create_weekly_window() {
    let ctx = TestContext::new();

    let window = create_window(&ctx, "3", "2025-01-15", "weekly").await;

    assert_eq!(window.person_id, "3");
    assert_eq!(window.start, at(10, 16));
    assert_eq!(window.end, at(17, 7));
    assert!(window.is_full_week);
}

#[tokio::test]
async fn test_current_prefers_daily_override() {
    let ctx = TestContext::new();
    create_window(&ctx, "3", "2025-01-15", "weekly").await;
    create_window(&ctx, "2", "2025-01-13", "daily").await;

    let response = ctx
        .server
        .get("/api/standby/current")
        .add_query_param("at", "2025-01-13T20:00:00Z")
        .await;
    response.assert_status_ok();
    let current = response.json::<CurrentStandbyResponse>();

    assert_eq!(current.person.map(|p| p.name), Some("Jean Gagnon".to_string()));
    assert_eq!(current.window.map(|w| w.is_full_week), Some(false));
}

#[tokio::test]
async fn test_current_with_nobody_on_call() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/standby/current")
        .add_query_param("at", "2025-01-13T20:00:00Z")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();

    assert_eq!(body["person"], Value::Null);
    assert_eq!(body["window"], Value::Null);
}

#[tokio::test]
async fn test_overlapping_weekly_window_is_conflict() {
    let ctx = TestContext::new();
    create_window(&ctx, "3", "2025-01-15", "weekly").await;

    let response = ctx
        .server
        .post("/api/standby/windows")
        .json(&json!({ "person_id": "1", "date": "2025-01-12", "kind": "weekly" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_unknown_person_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/standby/windows")
        .json(&json!({ "person_id": "404", "date": "2025-01-15", "kind": "daily" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_windows_requires_both_bounds() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/standby/windows")
        .add_query_param("from", "2025-01-13T00:00:00Z")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_windows_in_range() {
    let ctx = TestContext::new();
    create_window(&ctx, "3", "2025-01-15", "weekly").await;
    create_window(&ctx, "1", "2025-01-22", "weekly").await;

    let all = ctx.server.get("/api/standby/windows").await.json::<Vec<AssignmentWindow>>();
    let first_week = ctx
        .server
        .get("/api/standby/windows")
        .add_query_param("from", "2025-01-11T00:00:00Z")
        .add_query_param("to", "2025-01-12T00:00:00Z")
        .await
        .json::<Vec<AssignmentWindow>>();

    assert_eq!(all.len(), 2);
    assert_eq!(first_week.len(), 1);
    assert_eq!(first_week[0].person_id, "3");
}

#[tokio::test]
async fn test_reassign_and_delete_window() {
    let ctx = TestContext::new();
    let window = create_window(&ctx, "3", "2025-01-15", "weekly").await;

    let reassigned = ctx
        .server
        .put(&format!("/api/standby/windows/{}", window.id))
        .json(&json!({ "person_id": "1" }))
        .await
        .json::<AssignmentWindow>();
    assert_eq!(reassigned.person_id, "1");

    let events = ctx.store.calendar_events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].person_id, "1");

    ctx.server
        .delete(&format!("/api/standby/windows/{}", window.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .delete(&format!("/api/standby/windows/{}", window.id))
        .await
        .assert_status_not_found();
    assert!(ctx.store.calendar_events().unwrap().is_empty());
}

#[tokio::test]
async fn test_upcoming_limits_count() {
    let ctx = TestContext::new();
    create_window(&ctx, "3", "2025-01-15", "weekly").await;
    create_window(&ctx, "1", "2025-01-22", "weekly").await;
    create_window(&ctx, "2", "2025-01-29", "weekly").await;

    let upcoming = ctx
        .server
        .get("/api/standby/upcoming")
        .add_query_param("at", "2025-01-12T00:00:00Z")
        .add_query_param("count", 2)
        .await
        .json::<Vec<AssignmentWindow>>();

    let people: Vec<String> = upcoming.into_iter().map(|w| w.person_id).collect();
    assert_eq!(people, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn test_on_call_hours_subtracts_overrides() {
    let ctx = TestContext::new();
    let weekly = create_window(&ctx, "3", "2025-01-15", "weekly").await;
    create_window(&ctx, "2", "2025-01-13", "daily").await;

    let response = ctx
        .server
        .get("/api/standby/hours/3")
        .add_query_param("from", "2025-01-01T00:00:00Z")
        .add_query_param("to", "2025-02-01T00:00:00Z")
        .await;
    response.assert_status_ok();
    let hours = response.json::<OnCallHoursResponse>();

    let expected = (weekly.end - weekly.start - Duration::hours(15)).num_hours() as f64;
    assert_eq!(hours.person_id, "3");
    assert_eq!(hours.hours, expected);
}

#[tokio::test]
async fn test_get_window_by_id() {
    let ctx = TestContext::new();
    let created = create_window(&ctx, "3", "2025-01-13", "daily").await;

    let response = ctx
        .server
        .get(&format!("/api/standby/windows/{}", created.id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<AssignmentWindow>(), created);

    let missing = ctx
        .server
        .get(&format!("/api/standby/windows/{}", uuid::Uuid::new_v4()))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_window_on_last_calendar_day_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/standby/windows")
        .json(&json!({ "person_id": "1", "date": NaiveDate::MAX.to_string(), "kind": "daily" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}
