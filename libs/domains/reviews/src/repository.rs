use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::Review;

/// Repository trait for review persistence operations
///
/// Implementations keep the wine's aggregate rating in step with its
/// reviews: every create/update/delete recomputes the mean (0 when the
/// last review goes away).
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn wine_exists(&self, wine_id: Uuid) -> ReviewResult<bool>;

    /// Reviews for one wine, newest first.
    async fn list_by_wine(&self, wine_id: Uuid) -> ReviewResult<Vec<Review>>;

    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>>;

    async fn create(&self, review: Review) -> ReviewResult<Review>;

    async fn update(&self, review: Review) -> ReviewResult<Review>;

    async fn delete(&self, id: Uuid) -> ReviewResult<bool>;
}

#[derive(Default)]
struct InMemoryState {
    // wine_id -> aggregate rating
    wines: HashMap<Uuid, f64>,
    reviews: HashMap<Uuid, Review>,
}

impl InMemoryState {
    fn recompute_rating(&mut self, wine_id: Uuid) {
        let ratings: Vec<i32> = self
            .reviews
            .values()
            .filter(|r| r.wine_id == wine_id)
            .map(|r| r.rating)
            .collect();

        let rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<i32>() as f64 / ratings.len() as f64
        };

        self.wines.insert(wine_id, rating);
    }
}

/// In-memory implementation of ReviewRepository for testing
#[derive(Clone, Default)]
pub struct InMemoryReviewRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a wine id so reviews can target it.
    pub fn register_wine(&self, wine_id: Uuid) {
        self.state.write().unwrap().wines.insert(wine_id, 0.0);
    }

    /// The wine's current aggregate rating, for asserting the recompute.
    pub fn wine_rating(&self, wine_id: Uuid) -> Option<f64> {
        self.state.read().unwrap().wines.get(&wine_id).copied()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn wine_exists(&self, wine_id: Uuid) -> ReviewResult<bool> {
        Ok(self.state.read().unwrap().wines.contains_key(&wine_id))
    }

    async fn list_by_wine(&self, wine_id: Uuid) -> ReviewResult<Vec<Review>> {
        let state = self.state.read().unwrap();
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|r| r.wine_id == wine_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>> {
        Ok(self.state.read().unwrap().reviews.get(&id).cloned())
    }

    async fn create(&self, review: Review) -> ReviewResult<Review> {
        let mut state = self.state.write().unwrap();
        let wine_id = review.wine_id;
        state.reviews.insert(review.id, review.clone());
        state.recompute_rating(wine_id);
        Ok(review)
    }

    async fn update(&self, review: Review) -> ReviewResult<Review> {
        let mut state = self.state.write().unwrap();
        if !state.reviews.contains_key(&review.id) {
            return Err(ReviewError::NotFound(review.id));
        }
        let wine_id = review.wine_id;
        state.reviews.insert(review.id, review.clone());
        state.recompute_rating(wine_id);
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> ReviewResult<bool> {
        let mut state = self.state.write().unwrap();
        match state.reviews.remove(&id) {
            Some(review) => {
                state.recompute_rating(review.wine_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateReview;

    fn review(wine_id: Uuid, rating: i32) -> Review {
        Review::new(
            wine_id,
            Uuid::now_v7(),
            CreateReview {
                rating,
                review_text: None,
            },
        )
    }

    #[tokio::test]
    async fn ratings_average_across_reviews() {
        let repo = InMemoryReviewRepository::new();
        let wine_id = Uuid::now_v7();
        repo.register_wine(wine_id);

        repo.create(review(wine_id, 5)).await.unwrap();
        let second = repo.create(review(wine_id, 3)).await.unwrap();
        assert_eq!(repo.wine_rating(wine_id), Some(4.0));

        repo.delete(second.id).await.unwrap();
        assert_eq!(repo.wine_rating(wine_id), Some(5.0));
    }

    #[tokio::test]
    async fn deleting_last_review_resets_rating_to_zero() {
        let repo = InMemoryReviewRepository::new();
        let wine_id = Uuid::now_v7();
        repo.register_wine(wine_id);

        let only = repo.create(review(wine_id, 4)).await.unwrap();
        repo.delete(only.id).await.unwrap();

        assert_eq!(repo.wine_rating(wine_id), Some(0.0));
    }
}
