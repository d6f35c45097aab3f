pub mod handlers;
pub mod messages;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every non-validation error response.
///
/// ```json
/// { "error": "Item not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// One violated request constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Offending field; empty when the violation concerns the whole body
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of a 400 validation response, violations in evaluation order.
///
/// ```json
/// { "errors": [{ "field": "name", "message": "Field \"name\" is required" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldViolation>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain errors convert into this at the handler boundary; nothing below
/// the handlers should know about status codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::Validation(errors) => {
                tracing::info!(
                    error_code = messages::CODE_VALIDATION,
                    ?errors,
                    "Request validation failed"
                );
                return (status, Json(ValidationErrorResponse { errors })).into_response();
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = messages::CODE_INVALID_ID, "Bad request: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = messages::CODE_NOT_FOUND, "Not found: {}", msg);
                msg
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = messages::CODE_INTERNAL, "Internal server error: {}", msg);
                msg
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
