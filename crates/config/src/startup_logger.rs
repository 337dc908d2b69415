//! Service startup logging for the Spoqen analytics service

use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "spoqen-analytics";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Spoqen Analytics Service Starting ===");
	info!("Service: {} v{}", service_name, service_version);
	info!("Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("Working directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("Log filter: {}", rust_log);
	}

	info!(
		"Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("Spoqen analytics service shutting down");
	info!(
		"Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion information
pub fn log_startup_complete(bind_address: &str) {
	info!("Spoqen analytics service started successfully");
	info!("Server listening on: {}", bind_address);
	info!("Ready to accept requests");
}
