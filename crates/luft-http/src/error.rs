//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps schema outcomes to HTTP status codes and JSON error bodies with
//! an error code, message, and details. Validation failures carry the
//! full issue list; usage errors and internal failures never expose their
//! message to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use luft_core::{LuftError, UsageError, ValidationError};
use luft_schema::{KindSpec, Schema};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Schema extension key overriding the status of a validation rejection.
pub const STATUS_EXTENSION: &str = "http.status";

/// Envelope of every non-2xx response: `{"error": {...}}`.
///
/// A rejected request puts its issue list under `error.details.issues`,
/// each issue shaped as [`luft_core::Issue`] serializes it. Other errors
/// leave `details` out.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// `VALIDATION_ERROR`, `BAD_REQUEST` or `INTERNAL_ERROR`.
    pub code: String,
    /// Issue count for a rejection, the JSON parse error for an unreadable
    /// body, fixed text otherwise.
    pub message: String,
    /// `{"issues": [...]}` for a schema rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request data did not conform to its schema (400 unless the
    /// schema overrides the status).
    #[error("{error}")]
    Validation {
        error: ValidationError,
        status: StatusCode,
    },

    /// The request body could not be read as JSON at all (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A schema or hook was misused (500). Logged, never returned.
    #[error("schema usage error: {0}")]
    Usage(#[from] UsageError),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// A validation rejection with the default 400 status.
    pub fn validation(error: ValidationError) -> Self {
        Self::Validation {
            error,
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// A validation rejection whose status honours the schema's
    /// `http.status` extension when it names a 4xx code.
    pub fn rejected_by<K: KindSpec>(error: ValidationError, schema: &Schema<K>) -> Self {
        let status = schema
            .extensions()
            .get(STATUS_EXTENSION)
            .and_then(serde_json::Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .and_then(|code| StatusCode::from_u16(code).ok())
            .filter(StatusCode::is_client_error)
            .unwrap_or(StatusCode::BAD_REQUEST);
        Self::Validation { error, status }
    }

    /// Map a convenience-call failure, honouring the schema's status override.
    pub fn from_luft<K: KindSpec>(err: LuftError, schema: &Schema<K>) -> Self {
        match err {
            LuftError::Validation(error) => Self::rejected_by(error, schema),
            LuftError::Usage(usage) => Self::Usage(usage),
        }
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { status, .. } => (*status, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Usage(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl From<LuftError> for AppError {
    fn from(err: LuftError) -> Self {
        match err {
            LuftError::Validation(error) => Self::validation(error),
            LuftError::Usage(usage) => Self::Usage(usage),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::validation(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Usage(_) => tracing::error!(error = %self, "schema usage error"),
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            _ => {}
        }

        let (message, details) = match self {
            Self::Validation { error, .. } => {
                let message = format!("request failed validation with {} issue(s)", error.len());
                let details = serde_json::json!({ "issues": error.issues() });
                (message, Some(details))
            }
            Self::Usage(_) | Self::Internal(_) => ("An internal error occurred".to_string(), None),
            other => (other.to_string(), None),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
