//! Spoqen Service
//!
//! Business logic for the analytics service: the call metrics
//! aggregator and the fixed-window rate limiter. Both are explicitly
//! constructed and dependency-injected; neither holds process-global
//! state.

pub mod metrics;
pub mod ratelimit;

pub use metrics::{CallMetricsService, CallMetricsTrait};
pub use ratelimit::{check_rate_limits, FixedWindowLimiter, LimiterCheck};
