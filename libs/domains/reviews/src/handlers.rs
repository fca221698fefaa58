use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_helpers::{CurrentUser, ValidatedJson};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ReviewResult;
use crate::models::{CreateReview, Review, UpdateReview};
use crate::repository::ReviewRepository;
use crate::service::ReviewService;

/// Review browsing, open to everyone.
pub fn public_router<R: ReviewRepository + 'static>(service: Arc<ReviewService<R>>) -> Router {
    Router::new()
        .route("/wines/{id}/reviews", get(list_reviews))
        .with_state(service)
}

/// Review mutations, behind the JWT middleware. The author is always the
/// authenticated user.
pub fn protected_router<R: ReviewRepository + 'static>(service: Arc<ReviewService<R>>) -> Router {
    Router::new()
        .route("/wines/{id}/reviews", post(add_review))
        .route(
            "/wines/{id}/reviews/{review_id}",
            put(update_review).delete(delete_review),
        )
        .with_state(service)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListReviewsResponse {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewResponse {
    pub message: String,
    pub review_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Reviews for a wine
///
/// GET /wines/:id/reviews
async fn list_reviews<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    Path(wine_id): Path<Uuid>,
) -> ReviewResult<Json<ListReviewsResponse>> {
    let reviews = service.list_reviews(wine_id).await?;
    Ok(Json(ListReviewsResponse { reviews }))
}

/// Review a wine
///
/// POST /wines/:id/reviews
async fn add_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(wine_id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> ReviewResult<impl IntoResponse> {
    let review = service
        .add_review(wine_id, current_user.id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            message: "Review added successfully".to_string(),
            review_id: review.id,
        }),
    ))
}

/// Update a review
///
/// PUT /wines/:id/reviews/:review_id
async fn update_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path((wine_id, review_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> ReviewResult<Json<MessageResponse>> {
    service
        .update_review(current_user.id, wine_id, review_id, input)
        .await?;

    Ok(Json(MessageResponse {
        message: "Review updated successfully".to_string(),
    }))
}

/// Delete a review
///
/// DELETE /wines/:id/reviews/:review_id
async fn delete_review<R: ReviewRepository>(
    State(service): State<Arc<ReviewService<R>>>,
    Extension(current_user): Extension<CurrentUser>,
    Path((wine_id, review_id)): Path<(Uuid, Uuid)>,
) -> ReviewResult<Json<MessageResponse>> {
    service
        .delete_review(current_user.id, wine_id, review_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Review deleted successfully".to_string(),
    }))
}
