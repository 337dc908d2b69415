//! Error types for upstream voice-AI API operations

use thiserror::Error;

/// Errors surfaced by the upstream calls client
///
/// All variants are fatal to the aggregation pass that hit them; the
/// client retries transient failures internally before giving up.
#[derive(Error, Debug)]
pub enum VapiError {
	#[error("Upstream API key is not configured")]
	MissingCredential,

	#[error("Upstream unavailable after {attempts} attempts: {reason}")]
	Unavailable { attempts: u32, reason: String },

	#[error("Upstream rejected request with HTTP {status_code}: {reason}")]
	ClientError { status_code: u16, reason: String },

	#[error("Unparsable upstream response: {reason}")]
	Protocol { reason: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Invalid upstream base URL '{url}': {reason}")]
	InvalidBaseUrl { url: String, reason: String },
}

pub type VapiResult<T> = Result<T, VapiError>;

impl VapiError {
	/// Extract the HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			VapiError::ClientError { status_code, .. } => Some(*status_code),
			VapiError::Http(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Whether a fresh attempt at the same request could succeed
	pub fn is_transient(&self) -> bool {
		matches!(self, VapiError::Unavailable { .. })
	}
}
