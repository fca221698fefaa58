//! # Axum Helpers
//!
//! Shared utilities for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT bearer authentication (token issuing, middleware)
//! - **[`errors`]**: uniform `{"message": ...}` error responses
//! - **[`extractors`]**: `ValidatedJson` (validator-backed JSON extractor)
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

pub use auth::{jwt_auth_middleware, CurrentUser, JwtAuth, JwtClaims, JwtConfig, ACCESS_TOKEN_TTL};
pub use errors::{AppError, ErrorResponse};
pub use extractors::ValidatedJson;
pub use server::{create_app, create_router, health_router, shutdown_signal, AppInfo};
