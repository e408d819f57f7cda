//! HTTP handlers for the JSON API and health checks.

pub mod health_handler;
pub mod user_handler;

pub use health_handler::health_routes;
pub use user_handler::user_routes;
