//! Upstream voice-AI platform integration types

pub mod errors;

use async_trait::async_trait;

use crate::calls::{CallsPage, CallsQuery};

pub use errors::{VapiError, VapiResult};

/// Source of paginated call records
///
/// Implemented by the HTTP client in `spoqen-vapi`; the trait seam
/// lets the metrics service run against scripted pages in tests.
#[async_trait]
pub trait CallsSource: Send + Sync {
	/// Fetch a single page for the given query.
	///
	/// Implementations own transient-failure retry; an `Err` return is
	/// final for the whole aggregation pass.
	async fn list_calls(&self, query: &CallsQuery) -> VapiResult<CallsPage>;
}
