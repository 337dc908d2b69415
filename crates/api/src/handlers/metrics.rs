//! Call metrics handlers

use axum::{
	extract::{Query, State},
	http::StatusCode,
	response::Json,
};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use spoqen_types::{DashboardMetrics, VapiError};
use tracing::{debug, error};

use crate::handlers::common::ErrorResponse;
use crate::state::AppState;

/// Query parameters for the call metrics endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsQuery {
	pub from: Option<String>,
	pub to: Option<String>,
}

/// Response payload for the call metrics endpoint
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MetricsResponse {
	pub metrics: DashboardMetrics,
	pub from: String,
	pub to: String,
	pub timestamp: i64,
}

/// Validate the requested date range.
///
/// Both bounds must be present, RFC 3339, and ordered `from <= to`.
fn parse_range(query: &MetricsQuery) -> Result<(String, String), String> {
	let from = query
		.from
		.as_deref()
		.ok_or_else(|| "missing required query parameter 'from'".to_string())?;
	let to = query
		.to
		.as_deref()
		.ok_or_else(|| "missing required query parameter 'to'".to_string())?;

	let from_ts = DateTime::parse_from_rfc3339(from)
		.map_err(|e| format!("invalid 'from' timestamp '{}': {}", from, e))?;
	let to_ts = DateTime::parse_from_rfc3339(to)
		.map_err(|e| format!("invalid 'to' timestamp '{}': {}", to, e))?;

	if from_ts > to_ts {
		return Err(format!("'from' ({}) is after 'to' ({})", from, to));
	}

	Ok((from.to_string(), to.to_string()))
}

/// GET /v1/metrics/calls - Aggregated call metrics for a date range
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/v1/metrics/calls",
    params(
        ("from" = String, Query, description = "Inclusive range start, RFC 3339", example = "2024-01-01T00:00:00Z"),
        ("to" = String, Query, description = "Inclusive range end, RFC 3339", example = "2024-01-31T23:59:59Z")
    ),
    responses(
        (status = 200, description = "Aggregated metrics", body = MetricsResponse),
        (status = 400, description = "Missing or invalid date range", body = ErrorResponse),
        (status = 500, description = "Aggregation failed", body = ErrorResponse)
    ),
    tag = "metrics"
))]
pub async fn get_call_metrics(
	State(state): State<AppState>,
	Query(query): Query<MetricsQuery>,
) -> Result<Json<MetricsResponse>, (StatusCode, Json<ErrorResponse>)> {
	let (from, to) = parse_range(&query).map_err(|message| {
		(
			StatusCode::BAD_REQUEST,
			Json(ErrorResponse::new("INVALID_RANGE", message)),
		)
	})?;

	debug!(from = %from, to = %to, "Aggregating call metrics");

	let metrics = state
		.metrics_service
		.dashboard_metrics(&from, &to)
		.await
		.map_err(|e| {
			error!(error = %e, "Call metrics aggregation failed");
			let code = match e {
				VapiError::MissingCredential => "UPSTREAM_CREDENTIAL_MISSING",
				_ => "UPSTREAM_ERROR",
			};
			(
				StatusCode::INTERNAL_SERVER_ERROR,
				Json(ErrorResponse::new(code, e.to_string())),
			)
		})?;

	Ok(Json(MetricsResponse {
		metrics,
		from,
		to,
		timestamp: chrono::Utc::now().timestamp(),
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	use async_trait::async_trait;
	use mockall::mock;
	use spoqen_config::RateLimitSettings;
	use spoqen_service::CallMetricsTrait;
	use spoqen_types::VapiResult;

	use crate::ratelimit::RateLimitGuards;

	mock! {
		Metrics {}

		#[async_trait]
		impl CallMetricsTrait for Metrics {
			async fn dashboard_metrics(
				&self,
				from_iso: &str,
				to_iso: &str,
			) -> VapiResult<DashboardMetrics>;
		}
	}

	fn state_with(mock: MockMetrics) -> AppState {
		AppState {
			metrics_service: Arc::new(mock),
			rate_limits: Arc::new(RateLimitGuards::from_settings(&RateLimitSettings {
				enabled: false,
				per_minute: 1,
				per_hour: 1,
			})),
		}
	}

	#[tokio::test]
	async fn returns_metrics_payload_for_valid_range() {
		let mut mock = MockMetrics::new();
		mock.expect_dashboard_metrics()
			.withf(|from, to| from == "2024-01-01T00:00:00Z" && to == "2024-01-31T23:59:59Z")
			.returning(|_, _| {
				Ok(DashboardMetrics {
					total: 3,
					answered: 1,
					missed: 1,
					conversion_rate: 1.0,
					avg_duration: 120.0,
				})
			});

		let response = get_call_metrics(
			State(state_with(mock)),
			Query(query(
				Some("2024-01-01T00:00:00Z"),
				Some("2024-01-31T23:59:59Z"),
			)),
		)
		.await
		.unwrap();

		assert_eq!(response.0.metrics.total, 3);
		assert_eq!(response.0.from, "2024-01-01T00:00:00Z");
	}

	#[tokio::test]
	async fn invalid_range_never_reaches_the_service() {
		let mut mock = MockMetrics::new();
		mock.expect_dashboard_metrics().never();

		let (status, body) = get_call_metrics(
			State(state_with(mock)),
			Query(query(None, Some("2024-01-31T23:59:59Z"))),
		)
		.await
		.unwrap_err();

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body.0.error, "INVALID_RANGE");
	}

	#[tokio::test]
	async fn upstream_failures_map_to_server_errors() {
		let mut mock = MockMetrics::new();
		mock.expect_dashboard_metrics().returning(|_, _| {
			Err(VapiError::Unavailable {
				attempts: 3,
				reason: "HTTP 503".to_string(),
			})
		});

		let (status, body) = get_call_metrics(
			State(state_with(mock)),
			Query(query(
				Some("2024-01-01T00:00:00Z"),
				Some("2024-01-31T23:59:59Z"),
			)),
		)
		.await
		.unwrap_err();

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body.0.error, "UPSTREAM_ERROR");
	}

	#[tokio::test]
	async fn missing_credential_gets_its_own_code() {
		let mut mock = MockMetrics::new();
		mock.expect_dashboard_metrics()
			.returning(|_, _| Err(VapiError::MissingCredential));

		let (status, body) = get_call_metrics(
			State(state_with(mock)),
			Query(query(
				Some("2024-01-01T00:00:00Z"),
				Some("2024-01-31T23:59:59Z"),
			)),
		)
		.await
		.unwrap_err();

		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body.0.error, "UPSTREAM_CREDENTIAL_MISSING");
	}

	fn query(from: Option<&str>, to: Option<&str>) -> MetricsQuery {
		MetricsQuery {
			from: from.map(|s| s.to_string()),
			to: to.map(|s| s.to_string()),
		}
	}

	#[test]
	fn accepts_ordered_rfc3339_range() {
		let parsed = parse_range(&query(
			Some("2024-01-01T00:00:00Z"),
			Some("2024-01-31T23:59:59Z"),
		));
		assert!(parsed.is_ok());
	}

	#[test]
	fn rejects_missing_bounds() {
		assert!(parse_range(&query(None, Some("2024-01-31T23:59:59Z"))).is_err());
		assert!(parse_range(&query(Some("2024-01-01T00:00:00Z"), None)).is_err());
	}

	#[test]
	fn rejects_malformed_timestamps() {
		assert!(parse_range(&query(Some("yesterday"), Some("2024-01-31T23:59:59Z"))).is_err());
		assert!(parse_range(&query(Some("2024-01-01"), Some("2024-01-31T23:59:59Z"))).is_err());
	}

	#[test]
	fn rejects_inverted_range() {
		let result = parse_range(&query(
			Some("2024-02-01T00:00:00Z"),
			Some("2024-01-01T00:00:00Z"),
		));
		assert!(result.is_err());
	}

	#[test]
	fn accepts_equal_bounds() {
		let result = parse_range(&query(
			Some("2024-01-01T00:00:00Z"),
			Some("2024-01-01T00:00:00Z"),
		));
		assert!(result.is_ok());
	}

	#[test]
	fn accepts_offset_timestamps() {
		let result = parse_range(&query(
			Some("2024-01-01T00:00:00+02:00"),
			Some("2024-01-31T23:59:59-05:00"),
		));
		assert!(result.is_ok());
	}
}
