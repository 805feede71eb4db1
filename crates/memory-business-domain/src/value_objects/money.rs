use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{checked_add, checked_mul, DomainError, DomainResult};

/// Non-negative decimal amount in a 3-letter currency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRecord")]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> DomainResult<Self> {
        let currency = currency.into();
        if amount < Decimal::ZERO {
            return Err(DomainError::validation("amount", "Amount cannot be negative"));
        }
        if currency.chars().count() != 3 {
            return Err(DomainError::validation(
                "currency",
                "Currency must be a 3-letter code (e.g., EUR, USD)",
            ));
        }
        Ok(Self { amount, currency })
    }

    /// Zero in the given currency
    pub fn zero(currency: impl Into<String>) -> DomainResult<Self> {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Sum of two amounts; currencies must match
    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        if self.currency != other.currency {
            return Err(DomainError::validation(
                "currency",
                format!("Cannot add {} and {}", self.currency, other.currency),
            ));
        }
        Money::new(
            checked_add("amount", self.amount, other.amount)?,
            self.currency.clone(),
        )
    }

    /// Scale the amount, keeping the currency
    pub fn multiply(&self, factor: Decimal) -> DomainResult<Money> {
        Money::new(
            checked_mul("amount", self.amount, factor)?,
            self.currency.clone(),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[derive(Deserialize)]
struct MoneyRecord {
    amount: Decimal,
    currency: String,
}

impl TryFrom<MoneyRecord> for Money {
    type Error = DomainError;

    fn try_from(record: MoneyRecord) -> DomainResult<Self> {
        Money::new(record.amount, record.currency)
    }
}
