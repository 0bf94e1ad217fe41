//! # Standby Handlers
//!
//! Endpoints answering "who is on call" and managing the rotation windows.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use standby_core::{
    errors::StandbyError,
    models::assignment::{
        AssignmentWindow, CreateWindowRequest, CurrentStandbyResponse, OnCallHoursResponse,
        ReassignWindowRequest, WindowKind,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

const DEFAULT_UPCOMING: usize = 4;

/// Instant to evaluate; defaults to the time of the request.
#[derive(Debug, Deserialize)]
pub struct AtQuery {
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub at: Option<DateTime<Utc>>,
    pub count: Option<usize>,
}

/// Optional `[from, to)` filter. Both bounds or neither.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Returns the person on call at `at`, with the window that decided it.
///
/// Both fields are `null` when nobody is on call.
#[axum::debug_handler]
pub async fn current(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AtQuery>,
) -> Result<Json<CurrentStandbyResponse>, AppError> {
    let at = query.at.unwrap_or_else(Utc::now);
    let window = state.standby.resolve_window(at).await?;
    let person = match &window {
        Some(window) => state.standby.person(&window.person_id).await?,
        None => None,
    };

    Ok(Json(CurrentStandbyResponse { at, person, window }))
}

pub async fn upcoming(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<AssignmentWindow>>, AppError> {
    let at = query.at.unwrap_or_else(Utc::now);
    let count = query.count.unwrap_or(DEFAULT_UPCOMING);
    let windows = state.standby.upcoming(at, count).await?;

    Ok(Json(windows))
}

pub async fn list_windows(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<AssignmentWindow>>, AppError> {
    let range = match (query.from, query.to) {
        (Some(from), Some(to)) if from < to => Some((from, to)),
        (Some(_), Some(_)) => {
            return Err(StandbyError::Validation("'from' must be before 'to'".to_string()).into());
        }
        (None, None) => None,
        _ => {
            return Err(StandbyError::Validation(
                "'from' and 'to' must be given together".to_string(),
            )
            .into());
        }
    };

    Ok(Json(state.standby.list_windows(range).await?))
}

#[axum::debug_handler]
pub async fn create_window(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateWindowRequest>,
) -> Result<(StatusCode, Json<AssignmentWindow>), AppError> {
    let window = match payload.kind {
        WindowKind::Weekly => {
            state
                .standby
                .create_weekly_assignment(&payload.person_id, payload.date)
                .await?
        }
        WindowKind::Daily => {
            state
                .standby
                .create_daily_assignment(&payload.person_id, payload.date)
                .await?
        }
    };

    Ok((StatusCode::CREATED, Json(window)))
}

pub async fn get_window(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentWindow>, AppError> {
    let window = state
        .standby
        .window(id)
        .await?
        .ok_or_else(|| StandbyError::NotFound(format!("Window with ID {} not found", id)))?;

    Ok(Json(window))
}

pub async fn reassign_window(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReassignWindowRequest>,
) -> Result<Json<AssignmentWindow>, AppError> {
    let window = state
        .standby
        .reassign_window(id, &payload.person_id)
        .await?
        .ok_or_else(|| StandbyError::NotFound(format!("Window with ID {} not found", id)))?;

    Ok(Json(window))
}

pub async fn delete_window(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.standby.remove_window(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StandbyError::NotFound(format!("Window with ID {} not found", id)).into())
    }
}

pub async fn on_call_hours(
    State(state): State<Arc<ApiState>>,
    Path(person_id): Path<String>,
    Query(query): Query<HoursQuery>,
) -> Result<Json<OnCallHoursResponse>, AppError> {
    let hours = state
        .standby
        .on_call_hours(&person_id, query.from, query.to)
        .await?;

    Ok(Json(OnCallHoursResponse {
        person_id,
        from: query.from,
        to: query.to,
        hours,
    }))
}
