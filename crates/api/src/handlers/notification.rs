use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use standby_core::{
    errors::StandbyError,
    models::notification::{MarkReadResponse, NotificationListResponse},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let notifications = state.standby.notifications_for(&user_id).await?;
    let unread = notifications.iter().filter(|n| !n.is_read).count();

    Ok(Json(NotificationListResponse {
        unread,
        notifications,
    }))
}

pub async fn mark_read(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.standby.mark_notification_read(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StandbyError::NotFound(format!("Notification with ID {} not found", id)).into())
    }
}

pub async fn mark_all_read(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<MarkReadResponse>, AppError> {
    let updated = state.standby.mark_all_read(&user_id).await?;
    Ok(Json(MarkReadResponse { updated }))
}
