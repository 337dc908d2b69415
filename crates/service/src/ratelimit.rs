//! Fixed-window rate limiter
//!
//! Per-key request counters with whole-window resets, an opportunistic
//! amortized sweep of expired entries and composition of several named
//! limiters into a single admission decision. Purely in-memory: state
//! is lost on restart, which is acceptable for abuse mitigation but not
//! for strict quota enforcement.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use spoqen_types::constants::limits::{LIMITER_SWEEP_INTERVAL_MS, MIN_RETRY_AFTER_SECS};
use spoqen_types::{
	CombinedRateLimitResult, LimiterStats, RateLimitConfig, RateLimitResult, UsageSnapshot,
};
use tracing::debug;

/// Per-key counter state
#[derive(Debug, Clone)]
struct RateLimitEntry {
	/// Requests admitted in the current window
	count: u32,
	/// When the current window began
	window_start: DateTime<Utc>,
	/// Most recent admitted request
	last_request: DateTime<Utc>,
}

/// Fixed-window request limiter keyed by arbitrary identifiers
///
/// The window resets entirely once its length has elapsed; rejected
/// requests do not consume budget. Admission checks are O(1) amortized;
/// the expired-entry sweep runs at most once per sweep interval, on the
/// request that crosses it.
#[derive(Debug)]
pub struct FixedWindowLimiter {
	config: RateLimitConfig,
	entries: DashMap<String, RateLimitEntry>,
	/// Unix millis of the last sweep
	last_cleanup: AtomicI64,
}

impl FixedWindowLimiter {
	pub fn new(config: RateLimitConfig) -> Self {
		Self {
			config,
			entries: DashMap::new(),
			last_cleanup: AtomicI64::new(Utc::now().timestamp_millis()),
		}
	}

	pub fn config(&self) -> &RateLimitConfig {
		&self.config
	}

	/// Admission check for `identifier` at the current time
	pub fn check(&self, identifier: &str) -> RateLimitResult {
		self.check_at(identifier, Utc::now())
	}

	/// Admission check at an explicit instant; the seam for time-based
	/// tests
	pub fn check_at(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitResult {
		self.maybe_sweep(now);

		let key = self.composite_key(identifier);
		let window = self.config.window();

		let mut entry = self.entries.entry(key).or_insert_with(|| RateLimitEntry {
			count: 0,
			window_start: now,
			last_request: now,
		});
		let counter = entry.value_mut();

		// Expired window: start fresh at now
		if now - counter.window_start >= window {
			counter.count = 0;
			counter.window_start = now;
		}

		let reset_at = counter.window_start + window;

		if counter.count >= self.config.max_requests {
			// Rejection consumes no budget and leaves the entry untouched
			return RateLimitResult {
				allowed: false,
				remaining: 0,
				reset_at,
				retry_after_secs: Some(retry_after_secs(reset_at, now)),
			};
		}

		counter.count += 1;
		counter.last_request = now;

		RateLimitResult {
			allowed: true,
			remaining: self.config.max_requests - counter.count,
			reset_at,
			retry_after_secs: None,
		}
	}

	/// Current usage for a key without mutating it
	pub fn get_usage(&self, identifier: &str) -> Option<UsageSnapshot> {
		let key = self.composite_key(identifier);
		self.entries.get(&key).map(|entry| UsageSnapshot {
			count: entry.count,
			max_requests: self.config.max_requests,
			window_start: entry.window_start,
			reset_at: entry.window_start + self.config.window(),
			last_request: entry.last_request,
		})
	}

	/// Remove all entries whose window has fully expired
	pub fn cleanup(&self) {
		self.sweep_at(Utc::now());
	}

	/// Drop every entry
	pub fn clear(&self) {
		self.entries.clear();
	}

	/// Table statistics
	pub fn stats(&self) -> LimiterStats {
		let millis = self.last_cleanup.load(Ordering::Relaxed);
		LimiterStats {
			total_entries: self.entries.len(),
			last_cleanup: DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now),
		}
	}

	fn composite_key(&self, identifier: &str) -> String {
		format!("{}:{}", self.config.key_prefix, identifier)
	}

	/// Sweep when more than the sweep interval has elapsed since the
	/// last one
	fn maybe_sweep(&self, now: DateTime<Utc>) {
		let now_millis = now.timestamp_millis();
		let last = self.last_cleanup.load(Ordering::Relaxed);

		if now_millis.saturating_sub(last) < LIMITER_SWEEP_INTERVAL_MS as i64 {
			return;
		}

		// Single sweeper per interval; losers of the race skip
		if self
			.last_cleanup
			.compare_exchange(last, now_millis, Ordering::Relaxed, Ordering::Relaxed)
			.is_ok()
		{
			self.sweep_entries(now);
		}
	}

	fn sweep_at(&self, now: DateTime<Utc>) {
		self.last_cleanup
			.store(now.timestamp_millis(), Ordering::Relaxed);
		self.sweep_entries(now);
	}

	fn sweep_entries(&self, now: DateTime<Utc>) {
		let window = self.config.window();
		// Counted inside the closure: concurrent inserts during the
		// retain make before/after length arithmetic unsound
		let mut removed = 0usize;
		self.entries.retain(|_, entry| {
			let keep = now - entry.window_start < window;
			if !keep {
				removed += 1;
			}
			keep
		});

		if removed > 0 {
			debug!(
				prefix = %self.config.key_prefix,
				removed,
				remaining = self.entries.len(),
				"Swept expired rate limit entries"
			);
		}
	}
}

/// One named limiter check in a composed admission decision
pub struct LimiterCheck<'a> {
	pub limiter: &'a FixedWindowLimiter,
	pub identifier: &'a str,
	pub name: &'a str,
}

impl<'a> LimiterCheck<'a> {
	pub fn new(limiter: &'a FixedWindowLimiter, identifier: &'a str, name: &'a str) -> Self {
		Self {
			limiter,
			identifier,
			name,
		}
	}
}

/// Evaluate several limiters in order, short-circuiting at the first
/// rejection.
///
/// Limiters after a rejection are not consulted and consume no budget.
pub fn check_rate_limits(checks: &[LimiterCheck<'_>]) -> CombinedRateLimitResult {
	check_rate_limits_at(checks, Utc::now())
}

/// Time-injected variant of [`check_rate_limits`]
pub fn check_rate_limits_at(
	checks: &[LimiterCheck<'_>],
	now: DateTime<Utc>,
) -> CombinedRateLimitResult {
	let mut results = Vec::with_capacity(checks.len());

	for check in checks {
		let result = check.limiter.check_at(check.identifier, now);
		let rejected = !result.allowed;
		results.push((check.name.to_string(), result.clone()));

		if rejected {
			return CombinedRateLimitResult::rejected(check.name, result, results);
		}
	}

	CombinedRateLimitResult::allowed(results)
}

/// Seconds until `reset_at`, rounded up and clamped to the floor
fn retry_after_secs(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
	let remaining_ms = (reset_at - now).num_milliseconds().max(0) as u64;
	let secs = remaining_ms.div_ceil(1000);
	secs.max(MIN_RETRY_AFTER_SECS)
}
