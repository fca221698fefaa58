use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Wine not found: {0}")]
    WineNotFound(Uuid),

    #[error("Review not found: {0}")]
    NotFound(Uuid),

    #[error("Review belongs to another user")]
    Forbidden,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

/// Convert ReviewError to AppError for the standard `{"message"}` responses
impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::WineNotFound(id) => AppError::NotFound(format!("Wine {} not found", id)),
            ReviewError::NotFound(id) => AppError::NotFound(format!("Review {} not found", id)),
            ReviewError::Forbidden => {
                AppError::Forbidden("You can only modify your own reviews".to_string())
            }
            ReviewError::Validation(msg) => AppError::BadRequest(msg),
            ReviewError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
