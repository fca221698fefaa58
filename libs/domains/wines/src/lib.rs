//! Wines Domain
//!
//! The product catalog: public browsing plus authenticated catalog
//! management. The aggregate `rating` field is derived from reviews and is
//! read-only here.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{WineError, WineResult};
pub use models::{CreateWine, UpdateWine, Wine};
pub use postgres::PgWineRepository;
pub use repository::{InMemoryWineRepository, WineRepository};
pub use service::WineService;
