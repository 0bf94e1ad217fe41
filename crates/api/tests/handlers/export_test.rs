use axum::http::header;
use pretty_assertions::assert_eq;
use serde_json::json;
use standby_core::export;

use crate::test_utils::TestContext;

async fn seed(ctx: &TestContext) {
    for (person_id, date, kind) in [
        ("3", "2025-01-15", "weekly"),
        ("2", "2025-01-13", "daily"),
    ] {
        ctx.server
            .post("/api/standby/windows")
            .json(&json!({ "person_id": person_id, "date": date, "kind": kind }))
            .await;
    }
}

#[tokio::test]
async fn test_csv_export() {
    let ctx = TestContext::new();
    seed(&ctx).await;

    let response = ctx.server.get("/api/standby/export.csv").await;
    response.assert_status_ok();

    let content_type = response.header(header::CONTENT_TYPE);
    assert!(content_type.to_str().unwrap().starts_with("text/csv"));
    let disposition = response.header(header::CONTENT_DISPOSITION);
    assert!(disposition.to_str().unwrap().contains("horaire-garde.csv"));

    let rows = export::parse_csv(&response.text()).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.person_name.as_str()).collect();
    assert_eq!(names, vec!["Luc Roy", "Jean Gagnon"]);
    assert_eq!(rows[0].email, "luc@example.com");
    assert!(rows[0].is_full_week);
}

#[tokio::test]
async fn test_html_export() {
    let ctx = TestContext::new();
    seed(&ctx).await;

    let response = ctx.server.get("/api/standby/export.html").await;
    response.assert_status_ok();

    let content_type = response.header(header::CONTENT_TYPE);
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let body = response.text();
    assert!(body.contains("Luc Roy"));
    assert!(body.contains("2025-01-10 16 h 00"));
}
