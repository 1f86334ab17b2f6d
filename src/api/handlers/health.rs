//! Health check endpoint handlers.
//!
//! Pushgate holds no connections of its own, so the only dependency worth
//! probing is the set of configured credential files.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use jiff::Timestamp;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus, ReadinessResponse};
use crate::config::FirebaseConfig;
use crate::services::notifications::verify_readable;
use crate::state::AppState;

/// Routes:
/// - `GET /health` - Basic health check
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Basic health check endpoint.
///
/// Degraded when some credential files are unreadable, unhealthy when
/// none are.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let credentials = check_credentials(&state.settings.firebase).await;
    let status = credentials.status;

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: Timestamp::now().to_string(),
        checks: HashMap::from([("credentials".to_string(), credentials)]),
    };

    let code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

/// Readiness check endpoint.
///
/// Ready once at least one project is configured.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "No projects configured", body = ReadinessResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let firebase = &state.settings.firebase;
    let projects = firebase.projects.len();
    let ready = projects > 0;

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        code,
        Json(ReadinessResponse {
            ready,
            projects,
            default_project: firebase.default_project.clone(),
        }),
    )
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_credentials(firebase: &FirebaseConfig) -> ComponentHealth {
    let start_time = Instant::now();
    let total = firebase.projects.len();

    let mut unreadable = Vec::new();
    for name in firebase.projects.keys() {
        let readable = match firebase.credentials_path(name) {
            Some(path) => verify_readable(&path).await.is_ok(),
            None => false,
        };
        if !readable {
            unreadable.push(name.as_str());
        }
    }

    let readable = total - unreadable.len();
    let (status, message) = if total == 0 {
        (HealthStatus::Degraded, "No projects configured".to_string())
    } else if unreadable.is_empty() {
        (
            HealthStatus::Healthy,
            format!("{} of {} projects readable", readable, total),
        )
    } else if readable == 0 {
        (HealthStatus::Unhealthy, "No credentials file is readable".to_string())
    } else {
        (
            HealthStatus::Degraded,
            format!("Unreadable credentials: {}", unreadable.join(", ")),
        )
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: Some(start_time.elapsed().as_millis() as u64),
    }
}
