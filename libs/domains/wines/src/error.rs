use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum WineError {
    #[error("Wine not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type WineResult<T> = Result<T, WineError>;

/// Convert WineError to AppError for the standard `{"message"}` responses
impl From<WineError> for AppError {
    fn from(err: WineError) -> Self {
        match err {
            WineError::NotFound(id) => AppError::NotFound(format!("Wine {} not found", id)),
            WineError::Validation(msg) => AppError::BadRequest(msg),
            WineError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for WineError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
