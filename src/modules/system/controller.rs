use axum::{Json, extract::State};
use scaffold_core::response::timestamp;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since the server state was built.
    pub uptime: f64,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub auth: &'static str,
    pub users: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiIndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// Liveness probe; answers outside the envelope and the rate limiter
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: timestamp(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// API version and entry points
pub async fn api_index() -> Json<ApiIndexResponse> {
    Json(ApiIndexResponse {
        message: "API is running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            auth: "/api/auth",
            users: "/api/users",
            health: "/health",
        },
    })
}
