//! Reviews Domain
//!
//! Wine reviews and the derived aggregate rating. The rating on a wine is
//! never written directly; it is recomputed from the review rows whenever
//! one is created, updated, or deleted.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ReviewError, ReviewResult};
pub use models::{CreateReview, Review, UpdateReview};
pub use postgres::PgReviewRepository;
pub use repository::{InMemoryReviewRepository, ReviewRepository};
pub use service::ReviewService;
