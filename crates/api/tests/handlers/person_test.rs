use pretty_assertions::assert_eq;
use standby_core::models::person::Person;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_persons_endpoints() {
    let ctx = TestContext::new();

    let persons = ctx.server.get("/api/persons").await.json::<Vec<Person>>();
    assert_eq!(persons.len(), 3);

    let marie = ctx.server.get("/api/persons/1").await.json::<Person>();
    assert_eq!(marie.name, "Marie Tremblay");
    ctx.server.get("/api/persons/99").await.assert_status_not_found();
}

#[tokio::test]
async fn test_health_reports_timezone() {
    let ctx = TestContext::new();

    let body = ctx.server.get("/health").await.json::<serde_json::Value>();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["timezone"], "UTC");
}
