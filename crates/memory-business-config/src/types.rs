//! Core configuration types and data structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main application configuration
///
/// Every section falls back to its defaults, so a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults applied to new quotes
    pub quotes: QuoteConfig,
    /// List page sizes
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Check every section; the first problem found is reported
    pub fn validate(&self) -> Result<()> {
        self.quotes.validate()?;
        self.pagination.validate()?;
        self.logging.validate()
    }
}

/// Quote defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuoteConfig {
    /// Three-letter currency code
    pub default_currency: String,
    /// Fraction in [0, 1], e.g. `0.20`
    pub default_tax_rate: Decimal,
    /// Days from creation a quote stays valid
    pub validity_days: u64,
}

impl QuoteConfig {
    fn validate(&self) -> Result<()> {
        if self.default_currency.chars().count() != 3 {
            return Err(ConfigError::Validation(format!(
                "quotes.default_currency must be a 3-letter code, got '{}'",
                self.default_currency
            )));
        }
        if self.default_tax_rate < Decimal::ZERO || self.default_tax_rate > Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "quotes.default_tax_rate must be between 0 and 1, got {}",
                self.default_tax_rate
            )));
        }
        Ok(())
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            default_currency: "EUR".to_string(),
            default_tax_rate: Decimal::new(20, 2),
            validity_days: 30,
        }
    }
}

/// Page sizes for list operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl PaginationConfig {
    fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(ConfigError::Validation(
                "pagination limits must be greater than 0".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::Validation(format!(
                "pagination.default_limit ({}) exceeds pagination.max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `memory_business=debug`
    pub level: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration
    fn load_config(&mut self) -> Result<AppConfig>;
    /// Save configuration
    fn save_config(&self, config: &AppConfig) -> Result<()>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> Result<()>;
}
