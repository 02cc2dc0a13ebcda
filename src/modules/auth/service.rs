use chrono::Utc;
use scaffold_core::AppError;

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto, RegisteredUser};
use super::session::SessionIssuer;

pub struct AuthService;

impl AuthService {
    /// Echoes the registration back. Nothing is stored and the password is
    /// dropped unread.
    pub async fn register_user(dto: RegisterRequestDto) -> Result<RegisteredUser, AppError> {
        tracing::info!(user.email = %dto.email, "User registered");
        Ok(RegisteredUser {
            username: dto.username,
            email: dto.email,
            created_at: Utc::now(),
        })
    }

    pub async fn login_user(
        issuer: &dyn SessionIssuer,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let session = issuer.issue(&dto.email).await.map_err(AppError::internal)?;
        tracing::info!(user.email = %dto.email, "Session issued");
        Ok(session)
    }

    pub async fn logout_user(
        issuer: &dyn SessionIssuer,
        token: Option<&str>,
    ) -> Result<(), AppError> {
        issuer.revoke(token).await.map_err(AppError::internal)
    }
}
