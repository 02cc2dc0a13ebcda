//! Session issuance port.
//!
//! Handlers ask a [`SessionIssuer`] for tokens instead of minting them
//! inline. The only adapter shipped is [`StaticSessionIssuer`], which hands
//! every caller the same token and remembers nothing.

use async_trait::async_trait;
use thiserror::Error;

use super::model::{LoginResponse, SessionUser};

pub const STATIC_TOKEN: &str = "mock-jwt-token";
pub const STATIC_USERNAME: &str = "Test User";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SessionIssuer: Send + Sync {
    /// Opens a session for `email` and returns its token and identity.
    async fn issue(&self, email: &str) -> Result<LoginResponse, SessionError>;

    /// Ends the session behind `token`, if any.
    async fn revoke(&self, token: Option<&str>) -> Result<(), SessionError>;
}

/// Issuer with no security semantics: no credential checks, no state.
#[derive(Debug, Clone)]
pub struct StaticSessionIssuer {
    token: String,
    username: String,
}

impl Default for StaticSessionIssuer {
    fn default() -> Self {
        Self {
            token: STATIC_TOKEN.to_string(),
            username: STATIC_USERNAME.to_string(),
        }
    }
}

#[async_trait]
impl SessionIssuer for StaticSessionIssuer {
    async fn issue(&self, email: &str) -> Result<LoginResponse, SessionError> {
        Ok(LoginResponse {
            token: self.token.clone(),
            user: SessionUser {
                email: email.to_string(),
                username: self.username.clone(),
            },
        })
    }

    async fn revoke(&self, _token: Option<&str>) -> Result<(), SessionError> {
        Ok(())
    }
}
