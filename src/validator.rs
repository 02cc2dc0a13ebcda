//! Request body validation.
//!
//! [`ValidatedBody`] is the validator adapter that sits in front of every
//! controller accepting a body. It parses JSON or url-encoded forms,
//! normalizes the DTO in place, runs every declarative rule and rejects the
//! request with a 400 envelope listing all failed fields.

use std::borrow::Cow;

use anyhow::anyhow;
use axum::{
    Form, Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::header::CONTENT_TYPE,
};
use scaffold_core::{AppError, FieldError};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

/// In-place cleanup applied to a DTO before its rules run.
pub trait Normalize {
    fn normalize(&mut self) {}
}

/// Trims surrounding whitespace without reallocating when nothing changes.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trims and lowercases an email address.
pub fn normalize_email(value: &mut String) {
    trim_in_place(value);
    if value.chars().any(|c| c.is_uppercase()) {
        *value = value.to_lowercase();
    }
}

/// Rule for fields that must not be blank; reported as "<field> is required".
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Rule for fields that only need to be present and non-empty; whitespace
/// counts as content.
pub fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn default_message(field: &str, code: &str) -> String {
    let mut chars = field.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => field.to_string(),
    };

    match code {
        "required" => format!("{} is required", label),
        _ => format!("{} is invalid", label),
    }
}

/// Flattens `validator` output into `{field, message}` pairs, ordered by
/// field name so responses are stable.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(Cow::to_string)
                    .unwrap_or_else(|| default_message(&field, &error.code));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect()
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::validation(vec![FieldError::new(
            field,
            default_message(field, "required"),
        )]);
    }

    if error_msg.contains("invalid type") || error_msg.contains("invalid value") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedBody<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedBody<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| {
                v.to_ascii_lowercase()
                    .starts_with("application/x-www-form-urlencoded")
            });

        let mut value = if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!(error = %rejection.body_text(), "Rejected form body");
                    AppError::bad_request(anyhow!("Invalid request body"))
                })?;
            value
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(json_rejection)?;
            value
        };

        value.normalize();
        value
            .validate()
            .map_err(|errors| AppError::validation(field_errors(&errors)))?;

        Ok(ValidatedBody(value))
    }
}
