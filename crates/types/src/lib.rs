//! Spoqen Types
//!
//! Shared models and traits for the Spoqen call analytics service.
//! This crate contains all domain models organized by business entity.

pub mod calls;
pub mod constants;
pub mod metrics;
pub mod models;
pub mod ratelimit;
pub mod vapi;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use calls::{CallMetadata, CallOutcome, CallRecord, CallsPage, CallsQuery, MISSED_REASONS};

pub use metrics::{DashboardMetrics, MetricsAccumulator};

pub use ratelimit::{
	CombinedRateLimitResult, LimiterStats, RateLimitConfig, RateLimitResult, UsageSnapshot,
};

pub use vapi::{CallsSource, VapiError, VapiResult};

pub use models::SecretString;
