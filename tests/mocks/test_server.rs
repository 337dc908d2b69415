//! Test server for integration tests
//!
//! Spawns the full application router on an ephemeral port, backed by
//! an injected calls source instead of the real upstream client.

use std::sync::Arc;

use spoqen_analytics::mocks::StaticCallsSource;
use spoqen_analytics::{AnalyticsBuilder, CallsSource, Settings};
use tokio::task::JoinHandle;

/// Test server instance bound to an ephemeral port
pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Spawn the app with the demo dataset and default rate limits
	#[allow(dead_code)]
	pub async fn spawn_demo() -> Self {
		Self::spawn_with_source(Arc::new(StaticCallsSource::demo()), 60).await
	}

	/// Spawn the app with a custom calls source and per-minute limit
	pub async fn spawn_with_source(source: Arc<dyn CallsSource>, per_minute: u32) -> Self {
		let mut settings = Settings::default();
		settings.rate_limiting.enabled = true;
		settings.rate_limiting.per_minute = per_minute;
		settings.rate_limiting.per_hour = per_minute * 10;

		let (app, _state) = AnalyticsBuilder::new()
			.with_settings(settings)
			.with_calls_source(source)
			.start()
			.expect("start test app");

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind test port");
		let addr = listener.local_addr().unwrap();
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self { base_url, handle }
	}

	#[allow(dead_code)]
	pub fn abort(self) {
		self.handle.abort();
	}
}
