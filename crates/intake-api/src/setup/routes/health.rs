//! Health check handlers and probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "alive" })))
}

/// Readiness probe - the store answers within the timeout.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = json!({
        "status": "ready",
        "database": "unknown"
    });

    let overall_ready =
        match tokio::time::timeout(READINESS_TIMEOUT, state.store.health_check()).await {
            Ok(Ok(())) => {
                response["database"] = json!("ready");
                true
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Database readiness check failed");
                response["database"] = json!(format!("not_ready: {}", e));
                false
            }
            Err(_) => {
                tracing::error!("Database readiness check timed out");
                response["database"] = json!("timeout");
                false
            }
        };

    if overall_ready {
        (StatusCode::OK, Json(response))
    } else {
        response["status"] = json!("not_ready");
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
