//! PostgreSQL connectivity for the workspace.
//!
//! Provides SeaORM connection management (pooling, retry, migrations), a
//! health check for readiness probes, and [`BaseRepository`], a thin generic
//! CRUD layer entity-based repositories build on.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config(config).await?;
//! postgres::run_migrations::<Migrator>(&db, "cellar_api").await?;
//! ```

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
