use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Static service metadata reported by the health endpoint.
#[derive(Clone, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl AppInfo {
    pub fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" when the process is serving requests
    pub status: &'static str,
    /// Service name
    pub name: &'static str,
    /// Service version
    pub version: &'static str,
}

/// Liveness probe. Readiness (`/ready`) is wired by the app since it needs a
/// database handle.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
async fn health(State(info): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: info.name,
        version: info.version,
    })
}

/// Router exposing `GET /health`.
pub fn health_router(info: AppInfo) -> Router {
    Router::new().route("/health", get(health)).with_state(info)
}
