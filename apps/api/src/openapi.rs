//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api;

/// Combined OpenAPI documentation for the Cellar API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cellar API",
        version = "0.1.0",
        description = "E-commerce backend for a wine catalog: users, wines, carts and reviews"
    ),
    paths(api::banner, api::readiness::ready),
    components(schemas(
        axum_helpers::ErrorResponse,
        api::BannerResponse,
        api::readiness::ReadyResponse,
        domain_users::CreateUser,
        domain_users::UpdateUser,
        domain_users::UserResponse,
        domain_users::LoginRequest,
        domain_users::LoginResponse,
        domain_wines::Wine,
        domain_wines::CreateWine,
        domain_wines::UpdateWine,
        domain_carts::CartItem,
        domain_carts::AddToCart,
        domain_carts::UpdateCartItem,
        domain_reviews::Review,
        domain_reviews::CreateReview,
        domain_reviews::UpdateReview,
    )),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "users", description = "Registration, login and account management"),
        (name = "wines", description = "Catalog browsing and management"),
        (name = "carts", description = "Per-user shopping carts"),
        (name = "reviews", description = "Wine reviews and the derived rating")
    )
)]
pub struct ApiDoc;
