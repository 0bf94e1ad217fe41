use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::person};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/persons", get(person::list_persons))
        .route("/api/persons/:id", get(person::get_person))
}
