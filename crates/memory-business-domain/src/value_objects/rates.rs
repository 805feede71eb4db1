use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{checked_mul, require_non_blank, DomainError, DomainResult};

fn check_unit_interval(field: &str, rate: Decimal) -> DomainResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(DomainError::validation(
            field,
            "Rate must be between 0 and 1 (e.g., 0.20 for 20%)",
        ));
    }
    Ok(())
}

fn fmt_percent(rate: Decimal, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:.1}%", rate * Decimal::ONE_HUNDRED)
}

/// Sales tax rate (VAT) in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub fn new(rate: Decimal) -> DomainResult<Self> {
        check_unit_interval("tax_rate", rate)?;
        Ok(Self(rate))
    }

    pub fn rate(&self) -> Decimal {
        self.0
    }

    /// Tax portion of `amount`
    pub fn apply_to(&self, amount: Decimal) -> Decimal {
        amount * self.0
    }

    /// Pre-tax amount grown by the rate: `amount * (1 + rate)`
    ///
    /// # Errors
    /// `ValidationError` when the taxed amount overflows.
    pub fn calculate_total_with_tax(&self, amount: Decimal) -> DomainResult<Decimal> {
        checked_mul("amount", amount, Decimal::ONE + self.0)
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = DomainError;

    fn try_from(rate: Decimal) -> DomainResult<Self> {
        TaxRate::new(rate)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

impl Default for TaxRate {
    /// 20%
    fn default() -> Self {
        Self(Decimal::new(20, 2))
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_percent(self.0, f)
    }
}

/// Overhead surcharge (management, risk, ...) in [0, 1]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OverheadRecord")]
pub struct OverheadPercentage {
    kind: String,
    rate: Decimal,
}

impl OverheadPercentage {
    pub fn new(kind: impl Into<String>, rate: Decimal) -> DomainResult<Self> {
        let kind = kind.into();
        require_non_blank("kind", &kind)?;
        check_unit_interval("rate", rate)?;
        Ok(Self { kind, rate })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn apply_to(&self, amount: Decimal) -> Decimal {
        amount * self.rate
    }
}

impl fmt::Display for OverheadPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.kind)?;
        fmt_percent(self.rate, f)
    }
}

#[derive(Deserialize)]
struct OverheadRecord {
    kind: String,
    rate: Decimal,
}

impl TryFrom<OverheadRecord> for OverheadPercentage {
    type Error = DomainError;

    fn try_from(record: OverheadRecord) -> DomainResult<Self> {
        OverheadPercentage::new(record.kind, record.rate)
    }
}
