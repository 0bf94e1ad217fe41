use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::standby};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/standby/current", get(standby::current))
        .route("/api/standby/upcoming", get(standby::upcoming))
        .route(
            "/api/standby/windows",
            get(standby::list_windows).post(standby::create_window),
        )
        .route(
            "/api/standby/windows/:id",
            get(standby::get_window)
                .put(standby::reassign_window)
                .delete(standby::delete_window),
        )
        .route("/api/standby/hours/:person_id", get(standby::on_call_hours))
}
