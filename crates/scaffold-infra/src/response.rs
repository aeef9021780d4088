//! Transport-neutral response helpers
//!
//! Handlers build a [`Response`] with one of these helpers and leave the
//! actual transport to whatever server hosts them.

use scaffold_core::{BaseError, ErrorInfo};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::InfraError;

/// Status code plus optional body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

/// Body of an error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: ErrorInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

fn error_response(status_code: u16, error: &dyn BaseError, error_code: Option<&str>) -> Response<ErrorResponse> {
    Response {
        status_code,
        body: Some(ErrorResponse {
            error: error.info(),
            error_code: error_code.map(str::to_string),
        }),
    }
}

/// 200 with a body
pub fn ok<T>(body: T) -> Response<T> {
    Response {
        status_code: 200,
        body: Some(body),
    }
}

/// 204 without a body
pub fn no_content() -> Response<()> {
    Response {
        status_code: 204,
        body: None,
    }
}

/// 400
pub fn bad_request(error: &dyn BaseError, error_code: Option<&str>) -> Response<ErrorResponse> {
    error_response(400, error, error_code)
}

/// 401
pub fn unauthorized(error: &dyn BaseError) -> Response<ErrorResponse> {
    error_response(401, error, None)
}

/// 403
pub fn forbidden(error: &dyn BaseError, error_code: Option<&str>) -> Response<ErrorResponse> {
    error_response(403, error, error_code)
}

/// 404
pub fn not_found(error: &dyn BaseError, error_code: Option<&str>) -> Response<ErrorResponse> {
    error_response(404, error, error_code)
}

/// 409
pub fn conflict(error: &dyn BaseError, error_code: Option<&str>) -> Response<ErrorResponse> {
    error_response(409, error, error_code)
}

/// 500. The cause is logged and only its stack trace reaches the body,
/// wrapped in a generic [`InfraError::Server`].
pub fn server_error(cause: Option<&dyn std::error::Error>, error_code: Option<&str>) -> Response<ErrorResponse> {
    if let Some(cause) = cause {
        error!(error = %cause, "Request failed with an unexpected error");
    }
    let server = InfraError::server(cause.map(|c| format!("{c:?}")));
    error_response(500, &server, error_code)
}
