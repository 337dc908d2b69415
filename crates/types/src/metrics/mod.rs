//! Dashboard metrics computed from classified call records

use serde::{Deserialize, Serialize};

use crate::calls::{CallOutcome, CallRecord};

/// Aggregated call metrics for a date range
///
/// Invariant: `answered + missed <= total`; records that are neither
/// answered nor missed (e.g. in progress) count toward `total` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardMetrics {
	/// Every record seen in the range
	pub total: u64,
	pub answered: u64,
	pub missed: u64,
	/// Answered calls with `converted=true` over all answered, in [0,1]
	pub conversion_rate: f64,
	/// Mean duration in seconds over answered calls
	pub avg_duration: f64,
}

impl DashboardMetrics {
	/// Metrics for an empty range
	pub fn empty() -> Self {
		Self {
			total: 0,
			answered: 0,
			missed: 0,
			conversion_rate: 0.0,
			avg_duration: 0.0,
		}
	}
}

/// Running totals for a single aggregation pass
///
/// Feed every record through [`MetricsAccumulator::record`], then call
/// [`MetricsAccumulator::finish`] to compute the derived rates.
#[derive(Debug, Default, Clone)]
pub struct MetricsAccumulator {
	total: u64,
	answered: u64,
	missed: u64,
	converted: u64,
	duration_total: f64,
}

impl MetricsAccumulator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Classify one record and fold it into the running totals
	pub fn record(&mut self, call: &CallRecord) {
		self.total += 1;

		match call.outcome() {
			CallOutcome::Answered => {
				self.answered += 1;
				self.duration_total += call.duration_or_zero();
				if call.is_converted() {
					self.converted += 1;
				}
			},
			CallOutcome::Missed => {
				self.missed += 1;
			},
			CallOutcome::Other => {},
		}
	}

	/// Number of records seen so far
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Compute the final metrics.
	///
	/// Rates are zero when no call was answered, never NaN.
	pub fn finish(self) -> DashboardMetrics {
		let (conversion_rate, avg_duration) = if self.answered > 0 {
			(
				self.converted as f64 / self.answered as f64,
				self.duration_total / self.answered as f64,
			)
		} else {
			(0.0, 0.0)
		};

		DashboardMetrics {
			total: self.total,
			answered: self.answered,
			missed: self.missed,
			conversion_rate,
			avg_duration,
		}
	}
}
