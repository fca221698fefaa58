use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A user's review of a wine. Every persisted change to a wine's reviews
/// recomputes that wine's aggregate rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub wine_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub review_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(wine_id: Uuid, user_id: Uuid, input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            wine_id,
            user_id,
            rating: input.rating,
            review_text: input.review_text,
            created_at: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, input: UpdateReview) {
        if let Some(rating) = input.rating {
            self.rating = rating;
        }
        if let Some(review_text) = input.review_text {
            self.review_text = Some(review_text);
        }
    }
}

/// Request body for POST /wines/{id}/reviews
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub review_text: Option<String>,
}

/// Request body for PUT /wines/{id}/reviews/{review_id}
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}
