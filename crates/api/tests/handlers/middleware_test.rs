use axum::http::StatusCode;
use rstest::rstest;
use standby_api::middleware::error_handling::{AppError, map_error};
use standby_core::errors::StandbyError;

#[rstest]
#[case(StandbyError::NotFound("Window not found".to_string()), StatusCode::NOT_FOUND)]
#[case(StandbyError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(StandbyError::Conflict("Already decided".to_string()), StatusCode::CONFLICT)]
#[case(StandbyError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    StandbyError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: StandbyError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_server_error() {
    let error: AppError = eyre::eyre!("connection reset").into();

    assert!(matches!(error.0, StandbyError::Database(_)));
}
