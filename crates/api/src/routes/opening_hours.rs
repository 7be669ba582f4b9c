use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/hours",
            get(handlers::opening_hours::list_opening_hours),
        )
        .route(
            "/api/hours",
            put(handlers::opening_hours::update_opening_hours),
        )
}
