//! Memory Business Configuration
//!
//! Loads [`AppConfig`] (quote defaults, pagination limits, log level) from an
//! optional TOML file layered under `MB_*` environment variables, and installs
//! the `tracing` subscriber.
//!
//! ```ignore
//! use memory_business_config::{init_logging, ConfigManager};
//!
//! let config = ConfigManager::new().load()?;
//! init_logging(&config.logging)?;
//! ```

pub mod error;
pub mod logging;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use logging::init_logging;
pub use manager::{ConfigManager, ENV_PREFIX};
pub use types::{
    AppConfig, ConfigManager as ConfigManagerTrait, LoggingConfig, PaginationConfig, QuoteConfig,
};
