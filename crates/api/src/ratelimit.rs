//! Per-IP rate limiting middleware
//!
//! Two fixed-window limiters (minute burst and hour sustained) are
//! checked together; the first rejection wins and becomes a 429 with a
//! `Retry-After` header.

use axum::{
	body::Body,
	extract::{Request, State},
	http::{header, HeaderValue, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use spoqen_config::RateLimitSettings;
use spoqen_service::{check_rate_limits, FixedWindowLimiter, LimiterCheck};
use spoqen_types::RateLimitConfig;
use tracing::warn;

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;

const MINUTE_WINDOW_MS: u64 = 60_000;
const HOUR_WINDOW_MS: u64 = 3_600_000;

/// Limiters guarding the public API surface
#[derive(Debug)]
pub struct RateLimitGuards {
	pub enabled: bool,
	pub minute: FixedWindowLimiter,
	pub hour: FixedWindowLimiter,
}

impl RateLimitGuards {
	pub fn from_settings(settings: &RateLimitSettings) -> Self {
		Self {
			enabled: settings.enabled,
			minute: FixedWindowLimiter::new(RateLimitConfig::new(
				MINUTE_WINDOW_MS,
				settings.per_minute,
				"minute",
			)),
			hour: FixedWindowLimiter::new(RateLimitConfig::new(
				HOUR_WINDOW_MS,
				settings.per_hour,
				"hour",
			)),
		}
	}
}

/// Rate limiting middleware applied to `/v1` routes
pub async fn rate_limit_middleware(
	State(state): State<AppState>,
	request: Request,
	next: Next,
) -> Response {
	let guards = &state.rate_limits;
	if !guards.enabled {
		return next.run(request).await;
	}

	let client_ip = client_ip(&request);
	let result = check_rate_limits(&[
		LimiterCheck::new(&guards.minute, &client_ip, "minute"),
		LimiterCheck::new(&guards.hour, &client_ip, "hour"),
	]);

	if result.allowed {
		return next.run(request).await;
	}

	let failed = result.failed_check.as_deref().unwrap_or("unknown");
	let retry_after = result.retry_after_secs.unwrap_or(1);
	warn!(
		client_ip = %client_ip,
		failed_check = failed,
		retry_after_secs = retry_after,
		"Rate limit exceeded"
	);

	let reset_at = result
		.results
		.last()
		.map(|(_, r)| r.reset_at.timestamp())
		.unwrap_or_else(|| chrono::Utc::now().timestamp());

	let body = Json(ErrorResponse::new(
		"RATE_LIMITED",
		format!(
			"Too many requests ({} limit exceeded), retry in {}s",
			failed, retry_after
		),
	));

	let mut response: Response<Body> = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
	let headers = response.headers_mut();
	if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
		headers.insert(header::RETRY_AFTER, value);
	}
	headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
	if let Ok(value) = HeaderValue::from_str(&reset_at.to_string()) {
		headers.insert("x-ratelimit-reset", value);
	}

	response
}

/// Extract the client IP from forwarding headers.
///
/// Falls back to a shared bucket when no header is present; the service
/// normally runs behind a proxy that sets `x-forwarded-for`.
fn client_ip(request: &Request) -> String {
	let headers = request.headers();

	if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
		if let Some(first) = forwarded.split(',').next() {
			let first = first.trim();
			if !first.is_empty() {
				return first.to_string();
			}
		}
	}

	if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
		if !real_ip.is_empty() {
			return real_ip.to_string();
		}
	}

	"unknown".to_string()
}
