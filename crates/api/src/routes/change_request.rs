use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers::change_request};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/standby/requests",
            get(change_request::list_requests).post(change_request::create_request),
        )
        .route("/api/standby/requests/:id", get(change_request::get_request))
        .route("/api/standby/requests/:id/respond", post(change_request::respond))
        .route("/api/standby/requests/:id/apply", post(change_request::apply))
}
