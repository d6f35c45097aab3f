//! JSON body extractor that runs a payload schema before the handler sees it.

use crate::errors::{AppError, FieldViolation, messages};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// A request payload that can check itself against raw JSON.
///
/// Implementations must evaluate every rule and report all violations in a
/// stable order instead of stopping at the first one.
pub trait ValidatePayload: Sized {
    fn validate_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>>;
}

/// JSON extractor with schema validation.
///
/// The body is parsed as untyped JSON first so that missing and wrongly
/// typed fields are reported as field violations rather than a serde error.
/// An empty body is treated as `null`. Failures reject with
/// [`AppError::Validation`], i.e. `400 {"errors": [...]}`.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateItem>) -> Response {
///     // `input` already passed the create schema
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: ValidatePayload,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        let payload = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                tracing::debug!(error = %e, "Rejecting malformed JSON body");
                AppError::Validation(vec![FieldViolation::new("", messages::INVALID_JSON)])
                    .into_response()
            })?
        };

        T::validate_payload(&payload)
            .map(ValidatedJson)
            .map_err(|errors| AppError::Validation(errors).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct Greeting(String);

    impl ValidatePayload for Greeting {
        fn validate_payload(payload: &Value) -> Result<Self, Vec<FieldViolation>> {
            match payload.get("hello").and_then(Value::as_str) {
                Some(who) => Ok(Greeting(who.to_string())),
                None => Err(vec![FieldViolation::new("hello", "missing")]),
            }
        }
    }

    async fn greet(ValidatedJson(Greeting(who)): ValidatedJson<Greeting>) -> String {
        who
    }

    async fn send(body: &'static str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/", post(greet));
        let response = app
            .oneshot(
                axum::http::Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_handler() {
        let (status, body) = send(r#"{"hello":"world"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"world");
    }

    #[tokio::test]
    async fn test_schema_violation_is_rejected_with_400() {
        let (status, body) = send(r#"{"bye":"world"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["field"], "hello");
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_body_level_violation() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["field"], "");
        assert_eq!(json["errors"][0]["message"], messages::INVALID_JSON);
    }
}
