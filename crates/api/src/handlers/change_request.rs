use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use standby_core::{
    errors::StandbyError,
    models::{
        assignment::AssignmentWindow,
        change_request::{ChangeRequest, CreateChangeRequest, RespondChangeRequest},
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub person_id: Option<String>,
}

fn not_found(id: Uuid) -> AppError {
    StandbyError::NotFound(format!("Change request with ID {} not found", id)).into()
}

pub async fn list_requests(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ChangeRequest>>, AppError> {
    let requests = state.standby.change_requests(query.person_id.as_deref()).await?;
    Ok(Json(requests))
}

#[axum::debug_handler]
pub async fn create_request(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateChangeRequest>,
) -> Result<(StatusCode, Json<ChangeRequest>), AppError> {
    let request = state.standby.request_standby_change(payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn get_request(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChangeRequest>, AppError> {
    let request = state
        .standby
        .change_request(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(request))
}

#[axum::debug_handler]
pub async fn respond(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondChangeRequest>,
) -> Result<Json<ChangeRequest>, AppError> {
    let request = state
        .standby
        .respond_to_change_request(id, payload.approved)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(request))
}

pub async fn apply(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<AssignmentWindow>), AppError> {
    let window = state
        .standby
        .apply_change_request(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((StatusCode::CREATED, Json(window)))
}
