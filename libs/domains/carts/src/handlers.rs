use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use axum_helpers::{CurrentUser, ValidatedJson};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::CartResult;
use crate::models::{AddToCart, CartItem, UpdateCartItem};
use crate::repository::CartRepository;
use crate::service::CartService;

/// Cart routes. All of them act on the authenticated user's own cart, so
/// everything sits behind the JWT middleware.
pub fn protected_router<R: CartRepository + 'static>(service: Arc<CartService<R>>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart))
        .route("/cart/{item_id}", put(update_item).delete(remove_item))
        .with_state(service)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub cart: Vec<CartItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// The current user's cart
///
/// GET /cart
async fn get_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
) -> CartResult<Json<CartResponse>> {
    let cart = service.get_cart(current_user.id).await?;
    Ok(Json(CartResponse { cart }))
}

/// Add a wine to the cart
///
/// POST /cart
async fn add_to_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> CartResult<impl IntoResponse> {
    service.add_to_cart(current_user.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Item added to cart successfully".to_string(),
        }),
    ))
}

/// Change an item's quantity
///
/// PUT /cart/:item_id
async fn update_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(item_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateCartItem>,
) -> CartResult<Json<MessageResponse>> {
    service.update_item(current_user.id, item_id, input).await?;

    Ok(Json(MessageResponse {
        message: "Cart item updated successfully".to_string(),
    }))
}

/// Remove an item from the cart
///
/// DELETE /cart/:item_id
async fn remove_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(item_id): Path<Uuid>,
) -> CartResult<Json<MessageResponse>> {
    service.remove_item(current_user.id, item_id).await?;

    Ok(Json(MessageResponse {
        message: "Cart item removed successfully".to_string(),
    }))
}
