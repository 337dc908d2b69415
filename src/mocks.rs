//! Mock calls sources for examples and testing
//!
//! This module provides simple, working mocks that can be used in
//! examples and tests without upstream credentials.

use async_trait::async_trait;

use spoqen_types::{
	CallMetadata, CallRecord, CallsPage, CallsQuery, CallsSource, VapiError, VapiResult,
};

/// Calls source serving a fixed set of pages, cursored by page index
#[derive(Debug, Clone)]
pub struct StaticCallsSource {
	pages: Vec<Vec<CallRecord>>,
}

impl StaticCallsSource {
	/// Serve all records as a single page
	pub fn single_page(records: Vec<CallRecord>) -> Self {
		Self {
			pages: vec![records],
		}
	}

	/// Serve the given pages in order
	pub fn with_pages(pages: Vec<Vec<CallRecord>>) -> Self {
		Self { pages }
	}

	/// A small demo dataset: one answered and converted call, one
	/// voicemail, one call still in progress
	pub fn demo() -> Self {
		Self::single_page(vec![
			mock_call("completed", None, Some(120.0), Some(true)),
			mock_call("completed", Some("voicemail"), None, None),
			mock_call("in-progress", None, None, None),
		])
	}
}

#[async_trait]
impl CallsSource for StaticCallsSource {
	async fn list_calls(&self, query: &CallsQuery) -> VapiResult<CallsPage> {
		let index = match &query.cursor {
			None => 0,
			Some(cursor) => cursor.parse::<usize>().map_err(|_| VapiError::Protocol {
				reason: format!("unknown cursor '{}'", cursor),
			})?,
		};

		let data = self
			.pages
			.get(index)
			.cloned()
			.ok_or_else(|| VapiError::Protocol {
				reason: format!("cursor '{}' out of range", index),
			})?;

		let next_cursor = if index + 1 < self.pages.len() {
			Some((index + 1).to_string())
		} else {
			None
		};

		Ok(CallsPage { data, next_cursor })
	}
}

/// Build a call record for tests and demos
pub fn mock_call(
	status: &str,
	ended_reason: Option<&str>,
	duration_seconds: Option<f64>,
	converted: Option<bool>,
) -> CallRecord {
	CallRecord {
		status: status.to_string(),
		ended_reason: ended_reason.map(|r| r.to_string()),
		duration_seconds,
		metadata: converted.map(|c| CallMetadata { converted: Some(c) }),
	}
}
