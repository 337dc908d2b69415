use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{get_call_metrics, health};
use crate::ratelimit::rate_limit_middleware;
use crate::security::add_security_headers;
use crate::state::AppState;
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

/// Build the application router with all layers applied
pub fn create_router(state: AppState) -> Router {
	let cors = CorsLayer::permissive();
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	// Rate limiting guards /v1 only; health stays unthrottled for probes
	let v1_routes = Router::new()
		.route("/metrics/calls", get(get_call_metrics))
		.route("/metrics/calls/", get(get_call_metrics))
		.route_layer(middleware::from_fn_with_state(
			state.clone(),
			rate_limit_middleware,
		));

	let base_router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.nest("/v1", v1_routes);

	#[cfg(feature = "openapi")]
	let base_router = base_router
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

	let router = base_router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.with_state(state);

	add_security_headers(router)
}
