//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, File};

/// Load configuration from the config file.
///
/// Reads `config/config.{toml,json,yaml}` when present; absent files
/// fall through to [`Settings::default`] at the call site.
pub fn load_config() -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name("config/config").required(false))
		.build()?;

	s.try_deserialize()
}
