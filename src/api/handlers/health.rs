//! Health check endpoint handlers.
//!
//! The relay has no backing store; readiness means a delivery target is
//! configured.

use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use std::collections::HashMap;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Health report
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

/// Health report; always 200, `degraded` without a delivery target.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let target_check = check_relay_target(&state);
    let status = target_check.status;

    let mut checks = HashMap::new();
    checks.insert("relay_target".to_string(), target_check);

    Json(HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    })
}

/// Readiness probe: 503 until a target URL is configured
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_relay_target(&state).status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn check_relay_target(state: &AppState) -> ComponentHealth {
    match state.target_url() {
        Some(_) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Configured".to_string()),
        },
        None => ComponentHealth {
            status: HealthStatus::Degraded,
            message: Some("SLACK_URL is not set".to_string()),
        },
    }
}
