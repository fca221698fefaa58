use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart item not found: {0}")]
    ItemNotFound(Uuid),

    // Adding a nonexistent wine is a bad request, not a missing resource:
    // the cart routes never address wines directly.
    #[error("Wine does not exist: {0}")]
    WineNotFound(Uuid),

    #[error("Cart item belongs to another user")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CartResult<T> = Result<T, CartError>;

/// Convert CartError to AppError for the standard `{"message"}` responses
impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ItemNotFound(id) => AppError::NotFound(format!("Cart item {} not found", id)),
            CartError::WineNotFound(id) => {
                AppError::BadRequest(format!("Wine {} does not exist", id))
            }
            CartError::Forbidden => {
                AppError::Forbidden("You can only modify your own cart".to_string())
            }
            CartError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
