//! Wire models for the upstream list-calls endpoint

use serde::{Deserialize, Serialize};

use super::CallRecord;
use crate::constants::limits::DEFAULT_PAGE_SIZE;

/// One page of call records from the upstream API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallsPage {
	pub data: Vec<CallRecord>,
	/// Cursor for the next page; absent on the final page
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next_cursor: Option<String>,
}

/// Query parameters for one list-calls request
#[derive(Debug, Clone, Serialize)]
pub struct CallsQuery {
	/// Inclusive range start, ISO-8601
	pub from: String,
	/// Inclusive range end, ISO-8601
	pub to: String,
	pub limit: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cursor: Option<String>,
}

impl CallsQuery {
	/// Build the first-page query for a date range
	pub fn for_range(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			limit: DEFAULT_PAGE_SIZE,
			cursor: None,
		}
	}

	/// Same range and limit, positioned at the given cursor
	pub fn with_cursor(&self, cursor: String) -> Self {
		Self {
			from: self.from.clone(),
			to: self.to.clone(),
			limit: self.limit,
			cursor: Some(cursor),
		}
	}
}
