//! Uniform response envelopes.
//!
//! Every endpoint under `/api` answers with the same JSON wrapper:
//!
//! ```json
//! {
//!   "success": true,
//!   "code": 200,
//!   "message": "Success",
//!   "data": { ... },
//!   "pagination": { "page": 1, "limit": 10, "total": 2, "totalPages": 1 },
//!   "timestamp": "2026-10-19T12:00:00.000Z"
//! }
//! ```
//!
//! `data`, `pagination` and `errors` are only serialized when present.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Current time as an RFC 3339 UTC string with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// The JSON wrapper returned by every API endpoint.
///
/// Build one with [`Envelope::success`] or [`Envelope::failure`]; both stamp
/// the current time. The status code is not range-checked, callers pass a
/// valid [`StatusCode`].
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = ()> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    pub timestamp: String,
}

impl<T> Envelope<T> {
    pub fn success(status: StatusCode) -> Self {
        Self {
            status,
            success: true,
            code: status.as_u16(),
            message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            data: None,
            pagination: None,
            errors: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            status,
            success: false,
            code: status.as_u16(),
            message: message.into(),
            data: None,
            pagination: None,
            errors: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl<T> IntoResponse for Envelope<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    fn to_value<T: Serialize>(envelope: &Envelope<T>) -> Value {
        serde_json::to_value(envelope).unwrap()
    }

    #[test]
    fn test_success_defaults() {
        let envelope: Envelope = Envelope::success(StatusCode::OK);
        let value = to_value(&envelope);

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["code"], json!(200));
        assert_eq!(value["message"], json!("Success"));
        assert!(value.get("data").is_none());
        assert!(value.get("pagination").is_none());
        assert!(value.get("errors").is_none());
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_success_with_data_and_pagination() {
        let envelope = Envelope::success(StatusCode::CREATED)
            .with_message("Created")
            .with_data(vec![1, 2, 3])
            .with_pagination(Pagination::new(1, 10, 3));
        let value = to_value(&envelope);

        assert_eq!(value["code"], json!(201));
        assert_eq!(value["message"], json!("Created"));
        assert_eq!(value["data"], json!([1, 2, 3]));
        assert_eq!(
            value["pagination"],
            json!({"page": 1, "limit": 10, "total": 3, "totalPages": 1})
        );
    }

    #[test]
    fn test_failure_with_errors() {
        let envelope = Envelope::failure("Request validation failed", StatusCode::BAD_REQUEST)
            .with_errors(vec![FieldError::new("email", "Email is invalid")]);
        let value = to_value(&envelope);

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["code"], json!(400));
        assert_eq!(
            value["errors"],
            json!([{"field": "email", "message": "Email is invalid"}])
        );
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_pagination_total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 0, 11).total_pages, 0);
    }

    #[test]
    fn test_timestamp_has_millisecond_precision() {
        let ts = timestamp();
        // 2026-10-19T12:00:00.000Z
        assert_eq!(ts.len(), 24);
        assert_eq!(&ts[19..20], ".");
    }

    #[tokio::test]
    async fn test_into_response_uses_code_as_status() {
        let response = Envelope::failure("User not found", StatusCode::NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], json!("User not found"));
        assert_eq!(value["code"], json!(404));
    }
}
