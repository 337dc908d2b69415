//! Request handlers

pub mod common;
pub mod health;
pub mod metrics;

pub use common::ErrorResponse;
pub use health::health;
pub use metrics::get_call_metrics;
