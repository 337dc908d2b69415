//! Spoqen Config
//!
//! Settings structures, configurable secret values and the file loader
//! for the analytics service.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::load_config;
pub use settings::{
	LogFormat, LoggingSettings, RateLimitSettings, ServerSettings, Settings, VapiSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
