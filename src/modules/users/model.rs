//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - A stored user
//! - [`NewUser`] - Input for the repository's create operation
//! - [`UserChanges`] - Partial update applied by the repository
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] - Create a new user
//! - [`UpdateUserDto`] - Partially update a user
//! - [`UserFilterParams`] - Query parameters for listing users

use scaffold_core::{IntegerInput, PaginationParams};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validator::{Normalize, normalize_email, not_blank, trim_in_place};

pub const AGE_RULE_MESSAGE: &str = "Age must be an integer between 1 and 150";

/// Age must read as an integer in 1..=150.
pub fn age_in_range(age: &IntegerInput) -> Result<(), ValidationError> {
    match age.as_i64() {
        Some(1..=150) => Ok(()),
        _ => Err(ValidationError::new("range").with_message(AGE_RULE_MESSAGE.into())),
    }
}

/// A user in the system.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Fields needed to store a user; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
}

/// A partial update. Every `Some` overrides the stored value, whatever it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

impl UserChanges {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
    }
}

#[derive(Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDto {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 2, max = 50, message = "Name must be between 2 and 50 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "age_in_range"))]
    pub age: Option<IntegerInput>,
}

impl Normalize for CreateUserDto {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
    }
}

#[derive(Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateUserDto {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "age_in_range"))]
    pub age: Option<IntegerInput>,
}

impl Normalize for UpdateUserDto {
    fn normalize(&mut self) {
        if let Some(name) = self.name.as_mut() {
            trim_in_place(name);
        }
        if let Some(email) = self.email.as_mut() {
            normalize_email(email);
        }
    }
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilterParams {
    /// Case-insensitive substring matched against name and email.
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl UserFilterParams {
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
