use axum::response::Json;
use serde::Serialize;

/// Health response payload
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
	pub status: String,
	pub service: String,
	pub version: String,
}

/// GET /health - Liveness probe
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service healthy", body = HealthResponse)),
    tag = "health"
))]
pub async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".to_string(),
		service: "spoqen-analytics".to_string(),
		version: env!("CARGO_PKG_VERSION").to_string(),
	})
}
