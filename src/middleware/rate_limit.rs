use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::DefaultDirectRateLimiter;
use scaffold_core::AppError;
use tracing::warn;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later";

/// Rejects requests once the shared window is exhausted.
///
/// The limiter is process-wide; every caller draws from the same budget.
pub async fn rate_limit(
    State(limiter): State<Arc<DefaultDirectRateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if limiter.check().is_err() {
        warn!(path = %req.uri().path(), "Rate limit exceeded");
        return Err(AppError::too_many_requests(anyhow!(RATE_LIMITED_MESSAGE)));
    }

    Ok(next.run(req).await)
}
