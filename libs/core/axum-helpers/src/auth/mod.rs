//! JWT bearer authentication.
//!
//! Stateless HS256 tokens: [`JwtAuth`] issues and verifies them, and
//! [`jwt_auth_middleware`] guards protected routes, exposing the caller as a
//! [`CurrentUser`] request extension.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, ACCESS_TOKEN_TTL};
pub use middleware::{jwt_auth_middleware, CurrentUser};
