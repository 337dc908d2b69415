//! Rate limiting value types
//!
//! The limiter itself lives in `spoqen-service`; these are the
//! configuration and result shapes shared across crates. The limiter
//! never errors: every outcome is represented in the returned value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits::{DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_MS};

/// Immutable configuration for one limiter instance
///
/// Non-positive `window_ms`/`max_requests` are a caller error; the
/// limiter does not validate them defensively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
	/// Fixed window length in milliseconds
	pub window_ms: u64,
	/// Requests admitted per window per key
	pub max_requests: u32,
	/// Namespace prepended to identifiers, `"<prefix>:<identifier>"`
	pub key_prefix: String,
}

impl RateLimitConfig {
	pub fn new(window_ms: u64, max_requests: u32, key_prefix: impl Into<String>) -> Self {
		Self {
			window_ms,
			max_requests,
			key_prefix: key_prefix.into(),
		}
	}

	/// Window length as a chrono duration for timestamp arithmetic
	pub fn window(&self) -> chrono::Duration {
		chrono::Duration::milliseconds(self.window_ms as i64)
	}
}

impl Default for RateLimitConfig {
	fn default() -> Self {
		Self {
			window_ms: DEFAULT_RATE_LIMIT_WINDOW_MS,
			max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
			key_prefix: "rl".to_string(),
		}
	}
}

/// Outcome of a single admission check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitResult {
	pub allowed: bool,
	/// Requests left in the current window (0 when rejected)
	pub remaining: u32,
	/// When the current window resets
	pub reset_at: DateTime<Utc>,
	/// Seconds until retry is worthwhile; set on rejection, minimum 1
	#[serde(skip_serializing_if = "Option::is_none")]
	pub retry_after_secs: Option<u64>,
}

/// Point-in-time usage for one key, without mutating the entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSnapshot {
	pub count: u32,
	pub max_requests: u32,
	pub window_start: DateTime<Utc>,
	pub reset_at: DateTime<Utc>,
	pub last_request: DateTime<Utc>,
}

/// Limiter table statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterStats {
	pub total_entries: usize,
	pub last_cleanup: DateTime<Utc>,
}

/// Result of evaluating several limiters in order
///
/// Evaluation short-circuits at the first rejection; `results` holds
/// the individual outcomes for every check that ran, keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedRateLimitResult {
	pub allowed: bool,
	/// Name of the limiter that rejected, when any did
	#[serde(skip_serializing_if = "Option::is_none")]
	pub failed_check: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub retry_after_secs: Option<u64>,
	pub results: Vec<(String, RateLimitResult)>,
}

impl CombinedRateLimitResult {
	/// All checks passed
	pub fn allowed(results: Vec<(String, RateLimitResult)>) -> Self {
		Self {
			allowed: true,
			failed_check: None,
			retry_after_secs: None,
			results,
		}
	}

	/// A check rejected; later limiters were not evaluated
	pub fn rejected(
		name: impl Into<String>,
		rejection: RateLimitResult,
		results: Vec<(String, RateLimitResult)>,
	) -> Self {
		Self {
			allowed: false,
			failed_check: Some(name.into()),
			retry_after_secs: rejection.retry_after_secs,
			results,
		}
	}
}
