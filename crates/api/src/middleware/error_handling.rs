//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the standby API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use standby_core::errors::StandbyError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `StandbyError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use standby_api::middleware::error_handling::AppError;
/// use standby_core::errors::StandbyError;
/// use uuid::Uuid;
///
/// async fn handler(id: Uuid, found: bool) -> Result<Json<Uuid>, AppError> {
///     if !found {
///         return Err(AppError(StandbyError::NotFound(format!("Window {} not found", id))));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub StandbyError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            StandbyError::NotFound(_) => StatusCode::NOT_FOUND,
            StandbyError::Validation(_) => StatusCode::BAD_REQUEST,
            StandbyError::Conflict(_) => StatusCode::CONFLICT,
            StandbyError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StandbyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from StandbyError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, StandbyError>` in handler functions that return `Result<T, AppError>`.
impl From<StandbyError> for AppError {
    fn from(err: StandbyError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the eyre error in a StandbyError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(StandbyError::Database(err))
    }
}

/// Maps a StandbyError to an HTTP response
///
/// # Arguments
///
/// * `err` - The StandbyError to convert
///
/// # Returns
///
/// * `Response` - An HTTP response with appropriate status code and body
pub fn map_error(err: StandbyError) -> Response {
    AppError(err).into_response()
}
