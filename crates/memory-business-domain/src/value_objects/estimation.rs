//! Inputs and output of the project cost estimation

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, DomainError, DomainResult};

/// Complexity tier of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Average effort for one complexity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord")]
pub struct EstimationRule {
    complexity: Complexity,
    average_hours: Decimal,
}

impl EstimationRule {
    pub fn new(complexity: Complexity, average_hours: Decimal) -> DomainResult<Self> {
        if average_hours <= Decimal::ZERO {
            return Err(DomainError::validation(
                "average_hours",
                "Average hours must be greater than 0",
            ));
        }
        Ok(Self {
            complexity,
            average_hours,
        })
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn average_hours(&self) -> Decimal {
        self.average_hours
    }
}

impl fmt::Display for EstimationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}h", self.complexity, self.average_hours)
    }
}

/// Staffing role with its daily and hourly rates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord")]
pub struct Profile {
    role: String,
    daily_rate: Decimal,
    hourly_rate: Decimal,
}

impl Profile {
    pub fn new(
        role: impl Into<String>,
        daily_rate: Decimal,
        hourly_rate: Decimal,
    ) -> DomainResult<Self> {
        let role = role.into();
        require_non_blank("role", &role)?;
        if daily_rate <= Decimal::ZERO {
            return Err(DomainError::validation(
                "daily_rate",
                "Daily rate must be greater than 0",
            ));
        }
        if hourly_rate <= Decimal::ZERO {
            return Err(DomainError::validation(
                "hourly_rate",
                "Hourly rate must be greater than 0",
            ));
        }
        Ok(Self {
            role,
            daily_rate,
            hourly_rate,
        })
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }
}

/// Result of a project estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EstimationRecord")]
pub struct ProjectEstimation {
    total_hours: Decimal,
    total_cost: Decimal,
    details: BTreeMap<String, serde_json::Value>,
}

impl ProjectEstimation {
    pub fn new(
        total_hours: Decimal,
        total_cost: Decimal,
        details: BTreeMap<String, serde_json::Value>,
    ) -> DomainResult<Self> {
        if total_hours < Decimal::ZERO {
            return Err(DomainError::validation(
                "total_hours",
                "Total hours cannot be negative",
            ));
        }
        if total_cost < Decimal::ZERO {
            return Err(DomainError::validation(
                "total_cost",
                "Total cost cannot be negative",
            ));
        }
        Ok(Self {
            total_hours,
            total_cost,
            details,
        })
    }

    pub fn total_hours(&self) -> Decimal {
        self.total_hours
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn details(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.details
    }
}

impl fmt::Display for ProjectEstimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h for {}", self.total_hours, self.total_cost)
    }
}

#[derive(Deserialize)]
struct RuleRecord {
    complexity: Complexity,
    average_hours: Decimal,
}

impl TryFrom<RuleRecord> for EstimationRule {
    type Error = DomainError;

    fn try_from(record: RuleRecord) -> DomainResult<Self> {
        EstimationRule::new(record.complexity, record.average_hours)
    }
}

#[derive(Deserialize)]
struct ProfileRecord {
    role: String,
    daily_rate: Decimal,
    hourly_rate: Decimal,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = DomainError;

    fn try_from(record: ProfileRecord) -> DomainResult<Self> {
        Profile::new(record.role, record.daily_rate, record.hourly_rate)
    }
}

#[derive(Deserialize)]
struct EstimationRecord {
    total_hours: Decimal,
    total_cost: Decimal,
    details: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<EstimationRecord> for ProjectEstimation {
    type Error = DomainError;

    fn try_from(record: EstimationRecord) -> DomainResult<Self> {
        ProjectEstimation::new(record.total_hours, record.total_cost, record.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rule_requires_positive_hours() {
        assert!(EstimationRule::new(Complexity::Simple, dec!(0)).is_err());
        let rule = EstimationRule::new(Complexity::Medium, dec!(10)).unwrap();
        assert_eq!(rule.to_string(), "medium: 10h");
    }

    #[test]
    fn test_profile_validation() {
        assert!(Profile::new("", dec!(500), dec!(60)).is_err());
        assert!(Profile::new("dev", dec!(0), dec!(60)).is_err());
        assert!(Profile::new("dev", dec!(500), dec!(-1)).is_err());
        assert!(Profile::new("dev", dec!(500), dec!(60)).is_ok());
    }

    #[test]
    fn test_estimation_rejects_negative_totals() {
        assert!(ProjectEstimation::new(dec!(-1), dec!(0), BTreeMap::new()).is_err());
        assert!(ProjectEstimation::new(dec!(0), dec!(-1), BTreeMap::new()).is_err());
        assert!(ProjectEstimation::new(dec!(0), dec!(0), BTreeMap::new()).is_ok());
    }
}
