use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::export};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/standby/export.csv", get(export::export_csv))
        .route("/api/standby/export.html", get(export::export_html))
}
