//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every request error is malformed input and maps to 400 with a JSON body.
//! Resolution itself never fails: an unmapped rule is a normal result.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code, e.g. "VALIDATION_ERROR".
    pub code: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request parsed but is not acceptable (400).
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = self.to_string();
        tracing::debug!(status = status.as_u16(), code, error = %message, "request rejected");

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<evident_core::ValidationError> for AppError {
    fn from(err: evident_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
