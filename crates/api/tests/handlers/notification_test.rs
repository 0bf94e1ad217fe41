use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use standby_core::models::notification::{MarkReadResponse, NotificationListResponse};

use crate::test_utils::TestContext;

async fn ask_jean(ctx: &TestContext, day: u32) {
    ctx.server
        .post("/api/standby/requests")
        .json(&json!({
            "requester_id": "1",
            "requested_person_id": "2",
            "start": format!("2025-01-{:02}T16:00:00Z", day),
            "end": format!("2025-01-{:02}T07:00:00Z", day + 1),
        }))
        .await
        .assert_status(StatusCode::CREATED);
}

async fn inbox(ctx: &TestContext, user_id: &str) -> NotificationListResponse {
    ctx.server
        .get(&format!("/api/notifications/{}", user_id))
        .await
        .json::<NotificationListResponse>()
}

#[tokio::test]
async fn test_mark_single_notification_read() {
    let ctx = TestContext::new();
    ask_jean(&ctx, 13).await;
    ask_jean(&ctx, 14).await;

    let before = inbox(&ctx, "2").await;
    ctx.server
        .post(&format!("/api/notifications/item/{}/read", before.notifications[0].id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let after = inbox(&ctx, "2").await;

    assert_eq!(before.unread, 2);
    assert_eq!(after.unread, 1);
}

#[tokio::test]
async fn test_mark_all_read() {
    let ctx = TestContext::new();
    ask_jean(&ctx, 13).await;
    ask_jean(&ctx, 14).await;

    let response = ctx
        .server
        .post("/api/notifications/2/read-all")
        .await
        .json::<MarkReadResponse>();

    assert_eq!(response.updated, 2);
    assert_eq!(inbox(&ctx, "2").await.unread, 0);
    assert!(inbox(&ctx, "1").await.notifications.is_empty());
}

#[tokio::test]
async fn test_mark_unknown_notification() {
    let ctx = TestContext::new();

    ctx.server
        .post(&format!("/api/notifications/item/{}/read", uuid::Uuid::new_v4()))
        .await
        .assert_status_not_found();
}
