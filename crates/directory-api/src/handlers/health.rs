//! Health check handlers
//!
//! Liveness and storage connectivity reports. Both answer 503 when the
//! storage probe fails.

use axum::{extract::State, http::StatusCode, Json};
use directory_service::dto::{DetailedHealthResponse, HealthResponse, HealthStatus};
use directory_service::HealthService;

use crate::state::AppState;

/// Basic health check
///
/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let report = HealthService::new(state.service_context()).check().await;
    (status_for(report.status), Json(report))
}

/// Detailed health check
///
/// GET /api/health/detailed
pub async fn detailed_health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<DetailedHealthResponse>) {
    let report = HealthService::new(state.service_context()).detailed().await;
    (status_for(report.status), Json(report))
}

fn status_for(status: HealthStatus) -> StatusCode {
    if status.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
