use crate::state::AppState;
use crate::validator::ValidatedBody;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use scaffold_core::{AppError, Envelope};
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto, RegisteredUser};
use super::service::AuthService;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Register a new user
#[instrument(skip_all)]
pub async fn register_user(
    ValidatedBody(dto): ValidatedBody<RegisterRequestDto>,
) -> Result<Envelope<RegisteredUser>, AppError> {
    let user = AuthService::register_user(dto).await?;
    Ok(Envelope::success(StatusCode::CREATED)
        .with_message("Registration successful")
        .with_data(user))
}

/// Log in and receive a session token
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedBody(dto): ValidatedBody<LoginRequest>,
) -> Result<Envelope<LoginResponse>, AppError> {
    let session = AuthService::login_user(state.sessions.as_ref(), dto).await?;
    Ok(Envelope::success(StatusCode::OK)
        .with_message("Login successful")
        .with_data(session))
}

/// Log out, revoking the bearer token when one is sent
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Envelope, AppError> {
    AuthService::logout_user(state.sessions.as_ref(), bearer_token(&headers)).await?;
    Ok(Envelope::success(StatusCode::OK).with_message("Logout successful"))
}
