//! Global limits and defaults for configuration and runtime

/// Records requested per upstream list-calls page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Per-attempt timeout for upstream requests in milliseconds
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000; // 10s

/// Retries after the first failed attempt (3 attempts total)
pub const DEFAULT_UPSTREAM_RETRIES: u32 = 2;

/// Base delay for exponential backoff between retries in milliseconds
/// (500ms, then 1000ms)
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Default rate limit window length in milliseconds
pub const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 60_000; // 1 minute

/// Default requests admitted per window per key
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 60;

/// Minimum gap between opportunistic limiter sweeps in milliseconds
pub const LIMITER_SWEEP_INTERVAL_MS: u64 = 300_000; // 5 minutes

/// Floor for Retry-After values returned on rejection, in seconds
pub const MIN_RETRY_AFTER_SECS: u64 = 1;
