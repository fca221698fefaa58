//! Server assembly: router construction, health endpoints, lifecycle.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{health_router, AppInfo, HealthResponse};
pub use shutdown::shutdown_signal;
