use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use standby_core::models::{
    assignment::{AssignmentWindow, CurrentStandbyResponse},
    change_request::{ChangeRequest, ChangeRequestStatus},
    notification::{NotificationKind, NotificationListResponse},
};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn request_body(message: Option<&str>) -> Value {
    json!({
        "requester_id": "1",
        "requested_person_id": "2",
        "start": "2025-01-13T16:00:00Z",
        "end": "2025-01-14T07:00:00Z",
        "message": message,
    })
}

async fn create_request(ctx: &TestContext) -> ChangeRequest {
    let response = ctx
        .server
        .post("/api/standby/requests")
        .json(&request_body(Some("Rendez-vous chez le dentiste")))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ChangeRequest>()
}

async fn respond(ctx: &TestContext, id: Uuid, approved: bool) -> axum_test::TestResponse {
    ctx.server
        .post(&format!("/api/standby/requests/{}/respond", id))
        .json(&json!({ "approved": approved }))
        .await
}

#[tokio::test]
async fn test_create_request_notifies_requested_person() {
    let ctx = TestContext::new();

    let request = create_request(&ctx).await;
    let inbox = ctx
        .server
        .get("/api/notifications/2")
        .await
        .json::<NotificationListResponse>();

    assert_eq!(request.status, ChangeRequestStatus::Pending);
    assert_eq!(request.responded_at, None);
    assert_eq!(inbox.unread, 1);
    assert_eq!(inbox.notifications[0].kind, NotificationKind::ChangeRequest);
    assert_eq!(inbox.notifications[0].related_request_id, Some(request.id));
}

#[tokio::test]
async fn test_invalid_range_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/standby/requests")
        .json(&json!({
            "requester_id": "1",
            "requested_person_id": "2",
            "start": "2025-01-14T07:00:00Z",
            "end": "2025-01-13T16:00:00Z",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_approve_then_second_response_conflicts() {
    let ctx = TestContext::new();
    let request = create_request(&ctx).await;

    let approved = respond(&ctx, request.id, true).await;
    approved.assert_status_ok();
    let approved = approved.json::<ChangeRequest>();
    assert_eq!(approved.status, ChangeRequestStatus::Approved);
    assert!(approved.responded_at.is_some());

    respond(&ctx, request.id, false)
        .await
        .assert_status(StatusCode::CONFLICT);

    let inbox = ctx
        .server
        .get("/api/notifications/1")
        .await
        .json::<NotificationListResponse>();
    assert_eq!(inbox.notifications.len(), 1);
    assert_eq!(inbox.notifications[0].kind, NotificationKind::ChangeRequestApproved);
}

#[tokio::test]
async fn test_respond_to_unknown_request() {
    let ctx = TestContext::new();

    respond(&ctx, Uuid::new_v4(), true)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_apply_approved_request_overrides_roster() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/standby/windows")
        .json(&json!({ "person_id": "1", "date": "2025-01-15", "kind": "weekly" }))
        .await
        .assert_status(StatusCode::CREATED);
    let request = create_request(&ctx).await;
    respond(&ctx, request.id, true).await.assert_status_ok();

    let applied = ctx
        .server
        .post(&format!("/api/standby/requests/{}/apply", request.id))
        .await;
    applied.assert_status(StatusCode::CREATED);
    let window = applied.json::<AssignmentWindow>();

    let current = ctx
        .server
        .get("/api/standby/current")
        .add_query_param("at", "2025-01-13T20:00:00Z")
        .await
        .json::<CurrentStandbyResponse>();

    assert_eq!(window.person_id, "2");
    assert!(!window.is_full_week);
    assert_eq!(current.person.map(|p| p.id), Some("2".to_string()));
}

#[tokio::test]
async fn test_pending_request_cannot_be_applied() {
    let ctx = TestContext::new();
    let request = create_request(&ctx).await;

    ctx.server
        .post(&format!("/api/standby/requests/{}/apply", request.id))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_requests_by_person() {
    let ctx = TestContext::new();
    create_request(&ctx).await;

    let for_jean = ctx
        .server
        .get("/api/standby/requests")
        .add_query_param("person_id", "2")
        .await
        .json::<Vec<ChangeRequest>>();
    let for_luc = ctx
        .server
        .get("/api/standby/requests")
        .add_query_param("person_id", "3")
        .await
        .json::<Vec<ChangeRequest>>();

    assert_eq!(for_jean.len(), 1);
    assert!(for_luc.is_empty());
}

#[tokio::test]
async fn test_get_request_by_id() {
    let ctx = TestContext::new();
    let request = create_request(&ctx).await;

    let fetched = ctx
        .server
        .get(&format!("/api/standby/requests/{}", request.id))
        .await
        .json::<ChangeRequest>();

    assert_eq!(fetched, request);
    ctx.server
        .get(&format!("/api/standby/requests/{}", Uuid::new_v4()))
        .await
        .assert_status_not_found();
}
