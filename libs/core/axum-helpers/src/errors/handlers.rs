use axum::response::{IntoResponse, Response};

use super::{AppError, messages};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    AppError::NotFound(messages::NOT_FOUND_RESOURCE.to_string()).into_response()
}
