//! Spoqen Analytics Server
//!
//! Main entry point for the analytics server

use spoqen_analytics::AnalyticsBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Start the complete server with all defaults and setup handled automatically
	AnalyticsBuilder::new().start_server().await
}
