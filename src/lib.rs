//! Spoqen Analytics Library
//!
//! Call analytics for the Spoqen AI-receptionist dashboard: aggregates
//! call records from the upstream voice-AI platform into dashboard
//! metrics and rate-limits the public API surface.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types - the most commonly used types
pub use spoqen_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	CallOutcome,
	// Primary domain entities
	CallRecord,
	CallsPage,
	CallsQuery,
	CallsSource,
	CombinedRateLimitResult,
	DashboardMetrics,
	RateLimitConfig,
	RateLimitResult,
	SecretString,
	UsageSnapshot,
	// Error types
	VapiError,
	VapiResult,
};

// Service layer
pub use spoqen_service::{
	check_rate_limits, CallMetricsService, CallMetricsTrait, FixedWindowLimiter, LimiterCheck,
};

// Upstream client
pub use spoqen_vapi::VapiClient;

// API layer
pub use spoqen_api::{create_router, AppState, RateLimitGuards};

// Config
pub use spoqen_config::{
	load_config, log_service_info, log_service_shutdown, log_startup_complete, ConfigurableValue,
	Settings,
};

// Module aliases for direct access to the member crates
pub mod types {
	pub use spoqen_types::*;
}

pub mod config {
	pub use spoqen_config::*;
}

pub mod service {
	pub use spoqen_service::*;
}

pub mod api {
	pub use spoqen_api::*;
}

pub mod vapi {
	pub use spoqen_vapi::*;
}

pub mod mocks;

// Re-export external dependencies for binaries and tests
pub use async_trait;
pub use reqwest;

/// Builder pattern for configuring the analytics service
pub struct AnalyticsBuilder {
	settings: Option<Settings>,
	source: Option<Arc<dyn CallsSource>>,
}

impl AnalyticsBuilder {
	pub fn new() -> Self {
		Self {
			settings: None,
			source: None,
		}
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Replace the upstream client with a custom calls source.
	///
	/// Used by tests and demos to run without upstream credentials.
	pub fn with_calls_source(mut self, source: Arc<dyn CallsSource>) -> Self {
		self.source = Some(source);
		self
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use spoqen_config::LogFormat;

		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Wire services and return the configured router with state
	pub fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();

		// Credential resolution happens here, before any network I/O
		let source: Arc<dyn CallsSource> = match self.source {
			Some(source) => source,
			None => {
				let api_key = settings.vapi_api_key().map_err(|e| {
					format!(
						"Failed to resolve upstream API key ({}). Set the VAPI_API_KEY \
						 environment variable or configure vapi.api_key.",
						e
					)
				})?;
				Arc::new(VapiClient::new(&settings.vapi, api_key)?)
			},
		};

		let metrics_service = Arc::new(CallMetricsService::new(source, settings.vapi.page_size));
		let rate_limits = Arc::new(RateLimitGuards::from_settings(&settings.rate_limiting));

		let app_state = AppState {
			metrics_service,
			rate_limits,
		};

		let router = create_router(app_state.clone());
		Ok((router, app_state))
	}

	/// Start the complete server with all defaults and setup.
	///
	/// Loads `.env` and the config file, initializes tracing, binds and
	/// serves the application.
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config().unwrap_or_default(),
		};

		self.init_tracing_from_settings(&settings)?;
		log_service_info();

		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		info!(
			"Upstream endpoint: {} (timeout {}ms, {} retries)",
			settings.vapi.endpoint, settings.vapi.timeout_ms, settings.vapi.max_retries
		);
		if settings.rate_limiting.enabled {
			info!(
				"Rate limiting enabled: {}/min, {}/hour per client",
				settings.rate_limiting.per_minute, settings.rate_limiting.per_hour
			);
		} else {
			info!("Rate limiting disabled");
		}

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start()?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /v1/metrics/calls");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if tokio::signal::ctrl_c().await.is_err() {
		// No signal handler available; serve until the task is dropped
		std::future::pending::<()>().await;
	}
}

impl Default for AnalyticsBuilder {
	fn default() -> Self {
		Self::new()
	}
}
