use std::sync::Arc;

use spoqen_service::CallMetricsTrait;

use crate::ratelimit::RateLimitGuards;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub metrics_service: Arc<dyn CallMetricsTrait>,
	pub rate_limits: Arc<RateLimitGuards>,
}
