use chrono::{Utc, Weekday};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string, to_value};
use standby_core::{
    models::{
        assignment::{AssignmentWindow, CreateWindowRequest, WindowKind},
        change_request::{ChangeRequestStatus, CreateChangeRequest},
        notification::NotificationKind,
        person::Person,
    },
    rotation::RotationPolicy,
};
use uuid::Uuid;

#[test]
fn test_window_serialization() {
    let start = Utc::now();
    let window = AssignmentWindow {
        id: Uuid::new_v4(),
        person_id: "3".to_string(),
        start,
        end: start + chrono::Duration::hours(15),
        is_full_week: false,
        created_at: start,
    };

    let json = to_string(&window).expect("Failed to serialize window");
    let deserialized: AssignmentWindow = from_str(&json).expect("Failed to deserialize window");

    assert_eq!(deserialized, window);
    assert_eq!(deserialized.kind(), WindowKind::Daily);
}

#[test]
fn test_person_optional_avatar() {
    let person: Person = from_str(
        r##"{"id":"1","name":"Marie Tremblay","initials":"MT","avatar":null,
            "phone":"514-555-0101","email":"marie@example.com","color":"#3b82f6"}"##,
    )
    .expect("Failed to deserialize person");

    assert_eq!(person.avatar, None);
    assert_eq!(person.initials, "MT");
}

#[test]
fn test_create_window_request_uses_lowercase_kind() {
    let request: CreateWindowRequest =
        from_str(r#"{"person_id":"3","date":"2025-01-15","kind":"weekly"}"#)
            .expect("Failed to deserialize create window request");

    assert_eq!(request.kind, WindowKind::Weekly);
    assert_eq!(request.date.to_string(), "2025-01-15");
}

#[rstest]
#[case(ChangeRequestStatus::Pending, "pending", false)]
#[case(ChangeRequestStatus::Approved, "approved", true)]
#[case(ChangeRequestStatus::Rejected, "rejected", true)]
fn test_change_request_status(
    #[case] status: ChangeRequestStatus,
    #[case] text: &str,
    #[case] terminal: bool,
) {
    assert_eq!(to_value(status).unwrap(), json!(text));
    assert_eq!(text.parse::<ChangeRequestStatus>().unwrap(), status);
    assert_eq!(status.is_terminal(), terminal);
}

#[rstest]
#[case(NotificationKind::ChangeRequest, "change_request")]
#[case(NotificationKind::ChangeRequestApproved, "change_request_approved")]
#[case(NotificationKind::ChangeRequestRejected, "change_request_rejected")]
fn test_notification_kind_text(#[case] kind: NotificationKind, #[case] text: &str) {
    assert_eq!(to_value(kind).unwrap(), json!(text));
    assert_eq!(text.parse::<NotificationKind>().unwrap(), kind);
}

#[test]
fn test_unknown_status_is_rejected() {
    assert!("reopened".parse::<ChangeRequestStatus>().is_err());
}

#[test]
fn test_change_request_message_is_optional() {
    let request: CreateChangeRequest = from_str(
        r#"{"requester_id":"1","requested_person_id":"2",
            "start":"2025-01-13T21:00:00Z","end":"2025-01-14T12:00:00Z"}"#,
    )
    .expect("Failed to deserialize change request");

    assert_eq!(request.message, None);
}

#[test]
fn test_default_rotation_policy() {
    let policy = RotationPolicy::default();

    assert_eq!(policy.handover_day, Weekday::Fri);
    assert_eq!(policy.shift_start.to_string(), "16:00:00");
    assert_eq!(policy.shift_end.to_string(), "07:00:00");
    assert_eq!(policy.timezone, chrono_tz::America::Toronto);
}
