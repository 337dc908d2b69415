//! Call records as returned by the upstream voice-AI platform
//!
//! Records are read-only inputs: produced by the upstream API, consumed
//! once per aggregation pass and never persisted by this service.

pub mod response;

use serde::{Deserialize, Serialize};

pub use response::{CallsPage, CallsQuery};

/// Upstream `endedReason` values that classify a call as missed.
///
/// Membership in this set marks a call as missed regardless of its
/// `status` field.
pub const MISSED_REASONS: [&str; 9] = [
	"customer-did-not-answer",
	"customer-busy",
	"voicemail",
	"no-routes-available",
	"customer-did-not-give-microphone-permission",
	"assistant-error",
	"assistant-not-found",
	"call-declined",
	"insufficient-funds",
];

/// Status value upstream reports for a call that ran to completion
pub const STATUS_COMPLETED: &str = "completed";

/// Free-form metadata attached to a call by the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallMetadata {
	/// Whether the receptionist converted the caller into a lead
	pub converted: Option<bool>,
}

/// A single call record from the upstream list-calls endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
	/// Upstream status enum, passed through verbatim
	pub status: String,
	/// Why the call ended, absent while a call is live
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ended_reason: Option<String>,
	/// Call duration in seconds, absent for calls that never connected
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub duration_seconds: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<CallMetadata>,
}

/// Classification buckets for dashboard metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
	/// Completed and not in the missed-reason set
	Answered,
	/// Ended for a reason in the missed-reason set, whatever the status
	Missed,
	/// Neither bucket (e.g. still in progress); counted in total only
	Other,
}

impl CallRecord {
	/// Classify this record into a dashboard bucket.
	///
	/// Missed takes precedence: a record whose `ended_reason` is in the
	/// missed set is missed even when `status` is "completed".
	pub fn outcome(&self) -> CallOutcome {
		if let Some(reason) = &self.ended_reason {
			if MISSED_REASONS.contains(&reason.as_str()) {
				return CallOutcome::Missed;
			}
		}

		if self.status == STATUS_COMPLETED {
			CallOutcome::Answered
		} else {
			CallOutcome::Other
		}
	}

	/// Duration in seconds, treating absent as zero
	pub fn duration_or_zero(&self) -> f64 {
		self.duration_seconds.unwrap_or(0.0)
	}

	/// Whether the dashboard marked this call as converted
	pub fn is_converted(&self) -> bool {
		self.metadata
			.as_ref()
			.and_then(|m| m.converted)
			.unwrap_or(false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(status: &str, ended_reason: Option<&str>) -> CallRecord {
		CallRecord {
			status: status.to_string(),
			ended_reason: ended_reason.map(|r| r.to_string()),
			duration_seconds: None,
			metadata: None,
		}
	}

	#[test]
	fn completed_without_reason_is_answered() {
		assert_eq!(record("completed", None).outcome(), CallOutcome::Answered);
	}

	#[test]
	fn completed_with_benign_reason_is_answered() {
		assert_eq!(
			record("completed", Some("customer-ended-call")).outcome(),
			CallOutcome::Answered
		);
	}

	#[test]
	fn missed_reason_wins_regardless_of_status() {
		assert_eq!(
			record("completed", Some("voicemail")).outcome(),
			CallOutcome::Missed
		);
		assert_eq!(
			record("queued", Some("customer-busy")).outcome(),
			CallOutcome::Missed
		);
	}

	#[test]
	fn in_progress_is_neither_bucket() {
		assert_eq!(record("in-progress", None).outcome(), CallOutcome::Other);
	}

	#[test]
	fn every_missed_reason_classifies_as_missed() {
		for reason in MISSED_REASONS {
			assert_eq!(
				record("completed", Some(reason)).outcome(),
				CallOutcome::Missed,
				"reason {} should be missed",
				reason
			);
		}
	}

	#[test]
	fn deserializes_upstream_camel_case() {
		let json = r#"{
			"status": "completed",
			"endedReason": "voicemail",
			"durationSeconds": 42.5,
			"metadata": {"converted": true}
		}"#;

		let record: CallRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.status, "completed");
		assert_eq!(record.ended_reason.as_deref(), Some("voicemail"));
		assert_eq!(record.duration_seconds, Some(42.5));
		assert!(record.is_converted());
	}

	#[test]
	fn tolerates_sparse_records() {
		let record: CallRecord = serde_json::from_str(r#"{"status": "in-progress"}"#).unwrap();
		assert_eq!(record.ended_reason, None);
		assert_eq!(record.duration_or_zero(), 0.0);
		assert!(!record.is_converted());
	}
}
