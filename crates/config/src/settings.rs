//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use spoqen_types::constants::limits::{
	DEFAULT_PAGE_SIZE, DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RETRY_BASE_DELAY_MS,
	DEFAULT_UPSTREAM_RETRIES, DEFAULT_UPSTREAM_TIMEOUT_MS,
};
use spoqen_types::SecretString;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub server: ServerSettings,
	pub vapi: VapiSettings,
	pub rate_limiting: RateLimitSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Upstream voice-AI API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VapiSettings {
	/// Base URL of the upstream API
	pub endpoint: String,
	/// Bearer credential for the upstream API
	///
	/// Example configurations:
	/// - Environment variable: `{"type": "env", "value": "VAPI_API_KEY"}`
	/// - Plain value: `{"type": "plain", "value": "your-key-here"}`
	pub api_key: ConfigurableValue,
	/// Per-attempt request timeout in milliseconds
	pub timeout_ms: u64,
	/// Retries after a transient failure (attempts = retries + 1)
	pub max_retries: u32,
	/// Base backoff delay in milliseconds, doubled per retry
	pub retry_base_delay_ms: u64,
	/// Records requested per page
	pub page_size: u32,
}

/// Rate limiting configuration for the HTTP surface
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitSettings {
	pub enabled: bool,
	/// Requests per minute per client IP
	pub per_minute: u32,
	/// Requests per hour per client IP
	pub per_hour: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			vapi: VapiSettings {
				endpoint: "https://api.vapi.ai".to_string(),
				api_key: ConfigurableValue::from_env("VAPI_API_KEY"),
				timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
				max_retries: DEFAULT_UPSTREAM_RETRIES,
				retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
				page_size: DEFAULT_PAGE_SIZE,
			},
			rate_limiting: RateLimitSettings {
				enabled: true,
				per_minute: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
				per_hour: DEFAULT_RATE_LIMIT_MAX_REQUESTS * 10,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Resolve the upstream API key into a `SecretString`.
	///
	/// An unresolvable or empty key is reported here rather than at the
	/// first upstream request.
	pub fn vapi_api_key(&self) -> Result<SecretString, ConfigurableValueError> {
		self.vapi.api_key.resolve_for_secret()
	}
}
