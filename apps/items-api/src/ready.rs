//! Readiness probe wired to the active storage backend.

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::{DatabaseConnection, check_health};

/// `None` for the in-memory backend, which is always ready.
pub async fn ready_handler(State(db): State<Option<DatabaseConnection>>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();
    if let Some(db) = &db {
        checks.push((
            "database",
            Box::pin(async move { check_health(db).await.map_err(|e| e.to_string()) }),
        ));
    }

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

pub fn ready_router(db: Option<DatabaseConnection>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}
