use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{api_index, health_check};

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub fn init_index_router() -> Router<AppState> {
    Router::new().route("/", get(api_index))
}
