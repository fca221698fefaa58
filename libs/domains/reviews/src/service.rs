use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{CreateReview, Review, UpdateReview};
use crate::repository::ReviewRepository;

/// Service layer for review business logic
#[derive(Clone)]
pub struct ReviewService<R: ReviewRepository> {
    repository: Arc<R>,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All reviews for a wine; 404 when the wine itself is unknown.
    pub async fn list_reviews(&self, wine_id: Uuid) -> ReviewResult<Vec<Review>> {
        if !self.repository.wine_exists(wine_id).await? {
            return Err(ReviewError::WineNotFound(wine_id));
        }

        self.repository.list_by_wine(wine_id).await
    }

    /// Persist a review and fold it into the wine's aggregate rating.
    pub async fn add_review(
        &self,
        wine_id: Uuid,
        user_id: Uuid,
        input: CreateReview,
    ) -> ReviewResult<Review> {
        if !self.repository.wine_exists(wine_id).await? {
            return Err(ReviewError::Validation(format!(
                "Wine {} does not exist",
                wine_id
            )));
        }

        self.repository
            .create(Review::new(wine_id, user_id, input))
            .await
    }

    /// Partially update a review; only its author may do so.
    pub async fn update_review(
        &self,
        actor: Uuid,
        wine_id: Uuid,
        review_id: Uuid,
        input: UpdateReview,
    ) -> ReviewResult<Review> {
        let mut review = self.authorize_review(actor, wine_id, review_id).await?;
        review.apply_update(input);
        self.repository.update(review).await
    }

    /// Delete a review; only its author may do so.
    pub async fn delete_review(
        &self,
        actor: Uuid,
        wine_id: Uuid,
        review_id: Uuid,
    ) -> ReviewResult<()> {
        self.authorize_review(actor, wine_id, review_id).await?;

        let deleted = self.repository.delete(review_id).await?;
        if !deleted {
            return Err(ReviewError::NotFound(review_id));
        }
        Ok(())
    }

    // Missing reviews (including ones hanging off a different wine than the
    // path claims) report 404 before ownership is considered.
    async fn authorize_review(
        &self,
        actor: Uuid,
        wine_id: Uuid,
        review_id: Uuid,
    ) -> ReviewResult<Review> {
        let review = self
            .repository
            .get_by_id(review_id)
            .await?
            .filter(|r| r.wine_id == wine_id)
            .ok_or(ReviewError::NotFound(review_id))?;

        if review.user_id != actor {
            return Err(ReviewError::Forbidden);
        }

        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryReviewRepository;

    struct Fixture {
        service: ReviewService<InMemoryReviewRepository>,
        repo: InMemoryReviewRepository,
        wine_id: Uuid,
    }

    fn fixture() -> Fixture {
        let repo = InMemoryReviewRepository::new();
        let wine_id = Uuid::now_v7();
        repo.register_wine(wine_id);
        Fixture {
            service: ReviewService::new(repo.clone()),
            repo,
            wine_id,
        }
    }

    fn create(rating: i32) -> CreateReview {
        CreateReview {
            rating,
            review_text: None,
        }
    }

    #[tokio::test]
    async fn listing_reviews_for_unknown_wine_is_not_found() {
        let f = fixture();
        let err = f.service.list_reviews(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ReviewError::WineNotFound(_)));
    }

    #[tokio::test]
    async fn reviewing_unknown_wine_is_a_validation_error() {
        let f = fixture();
        let err = f
            .service
            .add_review(Uuid::now_v7(), Uuid::now_v7(), create(4))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Validation(_)));
    }

    #[tokio::test]
    async fn ratings_five_and_three_average_to_four() {
        let f = fixture();

        f.service
            .add_review(f.wine_id, Uuid::now_v7(), create(5))
            .await
            .unwrap();
        let author = Uuid::now_v7();
        let second = f
            .service
            .add_review(f.wine_id, author, create(3))
            .await
            .unwrap();
        assert_eq!(f.repo.wine_rating(f.wine_id), Some(4.0));

        f.service
            .delete_review(author, f.wine_id, second.id)
            .await
            .unwrap();
        assert_eq!(f.repo.wine_rating(f.wine_id), Some(5.0));
    }

    #[tokio::test]
    async fn deleting_the_last_review_resets_rating_to_zero() {
        let f = fixture();
        let author = Uuid::now_v7();

        let only = f
            .service
            .add_review(f.wine_id, author, create(4))
            .await
            .unwrap();
        f.service
            .delete_review(author, f.wine_id, only.id)
            .await
            .unwrap();

        assert_eq!(f.repo.wine_rating(f.wine_id), Some(0.0));
    }

    #[tokio::test]
    async fn updating_a_review_recomputes_the_rating() {
        let f = fixture();
        let author = Uuid::now_v7();

        let review = f
            .service
            .add_review(f.wine_id, author, create(2))
            .await
            .unwrap();

        f.service
            .update_review(
                author,
                f.wine_id,
                review.id,
                UpdateReview {
                    rating: Some(5),
                    review_text: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(f.repo.wine_rating(f.wine_id), Some(5.0));
    }

    #[tokio::test]
    async fn only_the_author_may_modify_a_review() {
        let f = fixture();
        let author = Uuid::now_v7();

        let review = f
            .service
            .add_review(f.wine_id, author, create(4))
            .await
            .unwrap();

        let err = f
            .service
            .delete_review(Uuid::now_v7(), f.wine_id, review.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Forbidden));
    }

    #[tokio::test]
    async fn missing_review_is_not_found_before_ownership() {
        let f = fixture();

        let err = f
            .service
            .delete_review(Uuid::now_v7(), f.wine_id, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
    }

    #[tokio::test]
    async fn review_addressed_via_the_wrong_wine_is_not_found() {
        let f = fixture();
        let author = Uuid::now_v7();
        let other_wine = Uuid::now_v7();
        f.repo.register_wine(other_wine);

        let review = f
            .service
            .add_review(f.wine_id, author, create(4))
            .await
            .unwrap();

        let err = f
            .service
            .delete_review(author, other_wine, review.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(_)));
    }
}
