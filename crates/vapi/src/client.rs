//! Upstream calls client with bounded retry

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client, StatusCode,
};
use spoqen_config::VapiSettings;
use spoqen_types::{CallsPage, CallsQuery, CallsSource, SecretString, VapiError, VapiResult};
use tracing::{debug, warn};
use url::Url;

/// Path of the list-calls endpoint relative to the base URL
const CALLS_PATH: &str = "call";

/// Why an individual attempt failed, and whether another is worth making
enum AttemptError {
	/// Network failure or 5xx; retry within budget
	Transient(String),
	/// 4xx or malformed body; retrying cannot succeed
	Fatal(VapiError),
}

/// Client for the upstream voice-AI call API
///
/// One instance per process; `reqwest::Client` pools connections
/// internally so the client is cheap to clone and share.
#[derive(Debug, Clone)]
pub struct VapiClient {
	client: Client,
	calls_url: Url,
	api_key: SecretString,
	max_retries: u32,
	retry_base_delay: Duration,
}

impl VapiClient {
	/// Create a client from settings and a resolved credential.
	///
	/// Fails before any network I/O when the credential is empty or the
	/// base URL does not parse.
	pub fn new(settings: &VapiSettings, api_key: SecretString) -> VapiResult<Self> {
		if api_key.is_empty() {
			return Err(VapiError::MissingCredential);
		}

		let calls_url = Self::build_calls_url(&settings.endpoint)?;

		let mut headers = HeaderMap::new();
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		headers.insert(
			"User-Agent",
			HeaderValue::from_static("Spoqen-Analytics/0.1"),
		);

		let client = Client::builder()
			.default_headers(headers)
			.timeout(Duration::from_millis(settings.timeout_ms))
			.build()?;

		Ok(Self {
			client,
			calls_url,
			api_key,
			max_retries: settings.max_retries,
			retry_base_delay: Duration::from_millis(settings.retry_base_delay_ms),
		})
	}

	/// Join the base endpoint with the calls path, treating the base as
	/// a directory
	fn build_calls_url(base_url: &str) -> VapiResult<Url> {
		let mut base = Url::parse(base_url).map_err(|e| VapiError::InvalidBaseUrl {
			url: base_url.to_string(),
			reason: e.to_string(),
		})?;

		if !base.path().ends_with('/') {
			base.set_path(&format!("{}/", base.path()));
		}

		base.join(CALLS_PATH).map_err(|e| VapiError::InvalidBaseUrl {
			url: base_url.to_string(),
			reason: e.to_string(),
		})
	}

	/// Backoff delay before retry `retry` (1-based): base doubled per step
	fn backoff_delay(&self, retry: u32) -> Duration {
		self.retry_base_delay * 2u32.saturating_pow(retry.saturating_sub(1))
	}

	/// Issue one request for the given query, no retries
	async fn fetch_page(&self, query: &CallsQuery) -> Result<CallsPage, AttemptError> {
		let response = self
			.client
			.get(self.calls_url.clone())
			.bearer_auth(self.api_key.expose_secret())
			.query(query)
			.send()
			.await
			.map_err(|e| AttemptError::Transient(e.to_string()))?;

		let status = response.status();
		if status.is_server_error() {
			return Err(AttemptError::Transient(format!(
				"upstream returned HTTP {}",
				status.as_u16()
			)));
		}

		if status.is_client_error() {
			let reason = response
				.text()
				.await
				.unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
			return Err(AttemptError::Fatal(VapiError::ClientError {
				status_code: status.as_u16(),
				reason,
			}));
		}

		if status != StatusCode::OK {
			return Err(AttemptError::Transient(format!(
				"unexpected HTTP {}",
				status.as_u16()
			)));
		}

		let body = response
			.text()
			.await
			.map_err(|e| AttemptError::Transient(e.to_string()))?;

		serde_json::from_str(&body).map_err(|e| {
			AttemptError::Fatal(VapiError::Protocol {
				reason: e.to_string(),
			})
		})
	}
}

#[async_trait]
impl CallsSource for VapiClient {
	/// Fetch one page, retrying transient failures with exponential
	/// backoff up to the configured budget
	async fn list_calls(&self, query: &CallsQuery) -> VapiResult<CallsPage> {
		let max_attempts = self.max_retries + 1;
		let mut last_reason = String::new();

		for attempt in 1..=max_attempts {
			match self.fetch_page(query).await {
				Ok(page) => {
					debug!(
						records = page.data.len(),
						has_cursor = page.next_cursor.is_some(),
						attempt,
						"Fetched calls page"
					);
					return Ok(page);
				},
				Err(AttemptError::Fatal(error)) => return Err(error),
				Err(AttemptError::Transient(reason)) => {
					last_reason = reason;
					if attempt < max_attempts {
						let delay = self.backoff_delay(attempt);
						warn!(
							attempt,
							delay_ms = delay.as_millis() as u64,
							reason = %last_reason,
							"Transient upstream failure, retrying"
						);
						tokio::time::sleep(delay).await;
					}
				},
			}
		}

		Err(VapiError::Unavailable {
			attempts: max_attempts,
			reason: last_reason,
		})
	}
}
