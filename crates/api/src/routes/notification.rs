use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::notification};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/notifications/:user_id", get(notification::list_notifications))
        .route(
            "/api/notifications/:user_id/read-all",
            post(notification::mark_all_read),
        )
        .route("/api/notifications/item/:id/read", post(notification::mark_read))
}
