use anyhow::{Error, anyhow};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::{Envelope, FieldError};

pub const VALIDATION_FAILED_MESSAGE: &str = "Request validation failed";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub errors: Option<Vec<FieldError>>,
    /// Raised by the pipeline itself rather than by a handler deciding how
    /// to answer, such as an unmatched route.
    pub unhandled: bool,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            errors: None,
            unhandled: false,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// A resource already exists. Reported as 400 to match the rest of the
    /// validation surface.
    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn too_many_requests<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::TOO_MANY_REQUESTS, err)
    }

    pub fn payload_too_large<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, err)
    }

    /// Field-scoped validation failure carrying every failed check.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(VALIDATION_FAILED_MESSAGE),
            errors: Some(errors),
            unhandled: false,
        }
    }

    pub fn unhandled(mut self) -> Self {
        self.unhandled = true;
        self
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            status: self.status,
            message: self.error.to_string(),
            errors: self.errors.clone(),
            stack: format!("{:?}", self.error),
            chain: self.error.chain().map(|cause| cause.to_string()).collect(),
            unhandled: self.unhandled || self.status.is_server_error(),
        }
    }
}

/// Snapshot of an [`AppError`] stored in the response extensions so the
/// error-handling middleware can log it with request context and enrich the
/// body outside production.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
    pub stack: String,
    pub chain: Vec<String>,
    /// Server errors and pipeline failures; these get debug details in
    /// development. Handler-chosen client errors never do.
    pub unhandled: bool,
}

impl ErrorReport {
    pub fn envelope(&self) -> Envelope {
        let envelope = Envelope::failure(self.message.clone(), self.status);
        match &self.errors {
            Some(errors) => envelope.with_errors(errors.clone()),
            None => envelope,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = self.report();
        let mut response = report.envelope().into_response();
        response.extensions_mut().insert(report);
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
