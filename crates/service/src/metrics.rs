//! Call metrics aggregation service
//!
//! Walks the upstream list-calls pagination for a date range,
//! classifies every record and computes the dashboard rates. The pass
//! is all-or-nothing: any fatal upstream error discards partial totals.

use std::sync::Arc;

use async_trait::async_trait;
use spoqen_types::{
	CallsQuery, CallsSource, DashboardMetrics, MetricsAccumulator, VapiError, VapiResult,
};
use tracing::{debug, info};

/// Trait for metrics aggregation - enables easy mocking in tests
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait CallMetricsTrait: Send + Sync {
	/// Aggregate dashboard metrics for the inclusive range
	/// `[from_iso, to_iso]`.
	///
	/// Range format validation is the caller's responsibility; the
	/// strings are passed to the upstream API as-is.
	async fn dashboard_metrics(
		&self,
		from_iso: &str,
		to_iso: &str,
	) -> VapiResult<DashboardMetrics>;
}

/// Aggregates call records from a [`CallsSource`] into dashboard metrics
pub struct CallMetricsService {
	source: Arc<dyn CallsSource>,
	page_size: u32,
}

impl CallMetricsService {
	pub fn new(source: Arc<dyn CallsSource>, page_size: u32) -> Self {
		Self { source, page_size }
	}
}

#[async_trait]
impl CallMetricsTrait for CallMetricsService {
	async fn dashboard_metrics(
		&self,
		from_iso: &str,
		to_iso: &str,
	) -> VapiResult<DashboardMetrics> {
		let mut query = CallsQuery::for_range(from_iso, to_iso);
		query.limit = self.page_size;

		let mut acc = MetricsAccumulator::new();
		let mut pages = 0u32;

		// Pagination is sequential: each cursor comes from the previous page.
		loop {
			let page = self.source.list_calls(&query).await?;
			pages += 1;

			for call in &page.data {
				acc.record(call);
			}

			debug!(
				page = pages,
				records = page.data.len(),
				running_total = acc.total(),
				"Aggregated calls page"
			);

			match page.next_cursor {
				Some(cursor) => {
					// A cursor that does not advance would loop forever.
					if query.cursor.as_deref() == Some(cursor.as_str()) {
						return Err(VapiError::Protocol {
							reason: format!("pagination cursor '{}' did not advance", cursor),
						});
					}
					query = query.with_cursor(cursor);
				},
				None => break,
			}
		}

		let metrics = acc.finish();
		info!(
			from = from_iso,
			to = to_iso,
			pages,
			total = metrics.total,
			answered = metrics.answered,
			missed = metrics.missed,
			"Computed dashboard metrics"
		);

		Ok(metrics)
	}
}
