use axum::{Json, extract::State};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceStatus,
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub database: bool,
}

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

/// Liveness probe. No database or upstream calls.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { status: "ok" })
}

/// Full health check, queries the audit store.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.store.ping().await;

    Json(HealthResponse {
        status: if db_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceStatus {
            database: db_healthy,
        },
    })
}
