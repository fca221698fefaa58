//! API routes module

pub mod readiness;

use axum::middleware::from_fn_with_state;
use axum::{routing::get, Json, Router};
use axum_helpers::{jwt_auth_middleware, JwtAuth};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use domain_carts::{CartService, PgCartRepository};
use domain_reviews::{PgReviewRepository, ReviewService};
use domain_users::{PostgresUserRepository, UserService};
use domain_wines::{PgWineRepository, WineService};

use crate::state::AppState;

/// Create all API routes
///
/// Public routes (registration, login, catalog and review browsing) are
/// merged as-is; everything else goes through the JWT middleware.
pub fn routes(state: &AppState) -> Router {
    let jwt_auth = JwtAuth::new(&state.config.jwt);

    let users = Arc::new(UserService::new(PostgresUserRepository::new(
        state.db.clone(),
    )));
    let wines = Arc::new(WineService::new(PgWineRepository::new(state.db.clone())));
    let carts = Arc::new(CartService::new(PgCartRepository::new(state.db.clone())));
    let reviews = Arc::new(ReviewService::new(PgReviewRepository::new(
        state.db.clone(),
    )));

    let public = Router::new()
        .merge(domain_users::handlers::public_router(users.clone()))
        .merge(domain_users::auth_handlers::auth_router(
            users.clone(),
            jwt_auth.clone(),
        ))
        .merge(domain_wines::handlers::public_router(wines.clone()))
        .merge(domain_reviews::handlers::public_router(reviews.clone()));

    let protected = Router::new()
        .merge(domain_users::handlers::protected_router(users))
        .merge(domain_wines::handlers::protected_router(wines))
        .merge(domain_carts::handlers::protected_router(carts))
        .merge(domain_reviews::handlers::protected_router(reviews))
        .layer(from_fn_with_state(jwt_auth, jwt_auth_middleware));

    Router::new()
        .route("/", get(banner))
        .merge(readiness::router(state.db.clone()))
        .merge(public)
        .merge(protected)
}

#[derive(Serialize, ToSchema)]
pub struct BannerResponse {
    pub message: String,
}

/// Service banner
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Service banner", body = BannerResponse))
)]
pub(crate) async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Welcome to the Wine Cellar API".to_string(),
    })
}
