use axum::{
    Json,
    extract::{Path, State},
};
use standby_core::{errors::StandbyError, models::person::Person};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_persons(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Person>>, AppError> {
    Ok(Json(state.standby.persons().await?))
}

pub async fn get_person(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Person>, AppError> {
    let person = state
        .standby
        .person(&id)
        .await?
        .ok_or_else(|| StandbyError::NotFound(format!("Person with ID {} not found", id)))?;
    Ok(Json(person))
}
