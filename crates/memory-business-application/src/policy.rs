//! Plain policy values handed to use cases at construction time
//!
//! Keeping these as values lets the configuration layer decide where they
//! come from without this crate depending on it.

use memory_business_domain::quote::DEFAULT_VALIDITY_DAYS;
use memory_business_domain::value_objects::TaxRate;
use serde::{Deserialize, Serialize};

/// Defaults applied to new quotes when the command leaves them out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDefaults {
    pub currency: String,
    pub tax_rate: TaxRate,
    pub validity_days: u64,
}

impl Default for QuoteDefaults {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            tax_rate: TaxRate::default(),
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }
}

/// Page size limits for list use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Pagination {
    /// Requested limit, falling back to the default and capped at the max
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
        }
    }
}
