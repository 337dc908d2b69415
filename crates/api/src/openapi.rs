//! OpenAPI documentation (enabled with the `openapi` feature)

use utoipa::OpenApi;

use crate::handlers::common::ErrorResponse;
use crate::handlers::health::HealthResponse;
use crate::handlers::metrics::MetricsResponse;
use spoqen_types::DashboardMetrics;

#[derive(OpenApi)]
#[openapi(
	paths(
		crate::handlers::health::health,
		crate::handlers::metrics::get_call_metrics,
	),
	components(schemas(
		HealthResponse,
		MetricsResponse,
		DashboardMetrics,
		ErrorResponse,
	)),
	tags(
		(name = "health", description = "Service health"),
		(name = "metrics", description = "Call analytics")
	),
	info(
		title = "Spoqen Analytics API",
		description = "Call metrics aggregation for the Spoqen dashboard",
	)
)]
pub struct ApiDoc;
