//! Terminal error handling.
//!
//! [`not_found`] is the router fallback for unmatched routes and methods,
//! and [`error_handler`] is the stage every response passes through on its
//! way out. Handlers return [`AppError`], which renders a failure envelope
//! and leaves an [`ErrorReport`] in the response extensions. `error_handler`
//! picks that report up to log server errors with the request that caused
//! them and, in development, to add the debug representation and cause
//! chain to the body of unhandled errors.

use std::any::Any;

use anyhow::anyhow;
use axum::{
    body::{Body, to_bytes},
    extract::{OriginalUri, RawPathParams, Request, State, rejection::RawPathParamsRejection},
    http::{StatusCode, header::CONTENT_LENGTH},
    middleware::Next,
    response::{IntoResponse, Response},
};
use scaffold_config::Environment;
use scaffold_core::{AppError, Envelope, ErrorReport};
use serde_json::{Value, json};
use tracing::error;

#[derive(Clone, Copy, Debug)]
pub struct ErrorHandlerConfig {
    pub environment: Environment,
    pub body_limit: usize,
}

/// Fallback for any route or method nothing else matched.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found(anyhow!("Not Found - {}", uri)).unhandled()
}

/// Route parameters of the matched route, carried on the response so the
/// error handler can log them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathParams(pub Vec<(String, String)>);

/// Route layer recording the matched route's raw parameters.
pub async fn capture_path_params(
    params: Result<RawPathParams, RawPathParamsRejection>,
    req: Request,
    next: Next,
) -> Response {
    let captured = params
        .map(|params| {
            PathParams(
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            )
        })
        .unwrap_or_default();

    let mut response = next.run(req).await;
    response.extensions_mut().insert(captured);
    response
}

pub async fn error_handler(
    State(config): State<ErrorHandlerConfig>,
    req: Request,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, config.body_limit).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return AppError::payload_too_large(anyhow!("Request body too large"))
                .unhandled()
                .into_response();
        }
    };

    let method = parts.method.clone();
    let uri = parts.uri.clone();
    let response = next
        .run(Request::from_parts(parts, Body::from(bytes.clone())))
        .await;

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    if report.is_server_error() {
        let params = response
            .extensions()
            .get::<PathParams>()
            .cloned()
            .unwrap_or_default();
        error!(
            method = %method,
            url = %uri,
            params = ?params.0,
            query = uri.query().unwrap_or_default(),
            body = %String::from_utf8_lossy(&bytes),
            stack = %report.stack,
            "{}",
            report.message
        );
    }

    if config.environment != Environment::Development || !report.unhandled {
        return response;
    }

    with_debug_details(response, &report)
}

fn with_debug_details(response: Response, report: &ErrorReport) -> Response {
    let Ok(mut body) = serde_json::to_value(report.envelope()) else {
        return response;
    };

    if let Value::Object(map) = &mut body {
        map.insert("stack".to_string(), Value::String(report.stack.clone()));
        map.insert(
            "error".to_string(),
            json!({ "message": report.message, "chain": report.chain }),
        );
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body.to_string()))
}

/// Renders a panic inside a handler as a 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %detail, "Handler panicked");
    Envelope::failure("Internal Server Error", StatusCode::INTERNAL_SERVER_ERROR).into_response()
}
