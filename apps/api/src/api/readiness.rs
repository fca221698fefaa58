//! Readiness probe with a database round trip

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use axum_helpers::ErrorResponse;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: &'static str,
}

/// Readiness probe
///
/// GET /ready
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ReadyResponse),
        (status = 503, description = "Database unreachable", body = ErrorResponse)
    )
)]
pub(crate) async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match database::postgres::check_health(&db).await {
        Ok(()) => (StatusCode::OK, Json(ReadyResponse { status: "ready" })).into_response(),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    message: "Database unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Router exposing `GET /ready`.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
