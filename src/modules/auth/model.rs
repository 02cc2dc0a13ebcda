use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validator::{Normalize, normalize_email, not_blank, not_empty, trim_in_place};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username pattern"));

/// Passwords need at least one lowercase letter, one uppercase letter and one digit.
pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());

    if lower && upper && digit {
        return Ok(());
    }
    Err(ValidationError::new("password_strength").with_message(
        "Password must contain uppercase and lowercase letters and a number".into(),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequestDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"),
        regex(
            path = *USERNAME_RE,
            message = "Username may only contain letters, numbers and underscores"
        )
    )]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"), email(message = "Email is invalid"))]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters"),
        custom(function = "password_strength")
    )]
    pub password: String,
}

impl Normalize for RegisterRequestDto {
    fn normalize(&mut self) {
        trim_in_place(&mut self.username);
        normalize_email(&mut self.email);
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"), email(message = "Email is invalid"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "not_empty"))]
    pub password: String,
}

impl Normalize for LoginRequest {
    fn normalize(&mut self) {
        normalize_email(&mut self.email);
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Identity attached to an issued session.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}
