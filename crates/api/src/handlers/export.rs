use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

pub const CSV_FILENAME: &str = "horaire-garde.csv";

/// Downloads the whole roster as CSV.
pub async fn export_csv(State(state): State<Arc<ApiState>>) -> Result<impl IntoResponse, AppError> {
    let body = state.standby.export_csv().await?;
    let disposition = format!("attachment; filename=\"{}\"", CSV_FILENAME);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Printable roster; the browser's print dialog turns it into a PDF.
pub async fn export_html(State(state): State<Arc<ApiState>>) -> Result<Html<String>, AppError> {
    Ok(Html(state.standby.export_html().await?))
}
