//! Carts Domain
//!
//! Per-user shopping carts. Carts are created lazily by the first add and
//! merge duplicate wines into a single item, so the repository's upsert is
//! the concurrency-critical path.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CartError, CartResult};
pub use models::{AddToCart, CartItem, UpdateCartItem};
pub use postgres::PgCartRepository;
pub use repository::{CartRepository, InMemoryCartRepository};
pub use service::CartService;
