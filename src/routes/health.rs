//! Health check endpoints for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub stats_api: String,
}

/// Liveness probe — returns 200 if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks the user database and the stats API.
///
/// A database failure makes the service unready (503). The stats API is only
/// reported, since the dashboard degrades to flash messages without it.
pub async fn ready(State(state): State<AppState>) -> Response {
    if let Err(e) = sqlx::query("SELECT 1").execute(&state.db).await {
        tracing::warn!(error = %e, "Database health check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            ApiResponse::<HealthStatus>::error("DATABASE_UNAVAILABLE", &e.to_string()),
        )
            .into_response();
    }

    let stats_status = match state.stats.teams().await {
        Ok(_) => "reachable".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, base_url = state.stats.base_url(), "Stats API health check failed");
            format!("error: {e}")
        }
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        database: "connected".to_string(),
        stats_api: stats_status,
    })
    .into_response()
}
