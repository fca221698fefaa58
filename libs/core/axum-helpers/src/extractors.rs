use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Rejections (malformed JSON or failed validation rules) are converted into
/// 400 responses with the standard `{"message": ...}` body.
///
/// # Example
/// ```ignore
/// async fn create_user(
///     State(service): State<Arc<UserService<R>>>,
///     ValidatedJson(payload): ValidatedJson<CreateUser>,
/// ) -> Result<impl IntoResponse, UserError> { /* ... */ }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct CreateThing {
        #[validate(length(min = 3, message = "name too short"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let req = json_request(r#"{"name": "cabernet"}"#);
        let ValidatedJson(payload) = ValidatedJson::<CreateThing>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(payload.name, "cabernet");
    }

    #[tokio::test]
    async fn rejects_failed_validation_with_400() {
        let req = json_request(r#"{"name": "ab"}"#);
        let err = ValidatedJson::<CreateThing>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let req = json_request("{not json");
        let err = ValidatedJson::<CreateThing>::from_request(req, &())
            .await
            .unwrap_err();
        let status = err.into_response().status();
        assert!(status.is_client_error());
    }
}
