//! Spoqen API
//!
//! Axum router, handlers and rate-limit middleware for the analytics
//! service. Handlers stay thin: they validate input, call the service
//! layer and map errors to HTTP status codes.

pub mod handlers;
pub mod ratelimit;
pub mod router;
pub mod security;
pub mod state;

#[cfg(feature = "openapi")]
pub mod openapi;

pub use ratelimit::RateLimitGuards;
pub use router::create_router;
pub use state::AppState;
