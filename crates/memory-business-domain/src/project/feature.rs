//! Feature entity: the unit of estimation inside a module

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{
    checked_add, checked_mul, checked_sum, require_non_blank, DomainError, DomainResult,
};
use crate::value_objects::{Complexity, EstimationRule, FeatureId, ModuleId, Profile};

/// Accepted drift of the allocation ratio sum around 1.0
const ALLOCATION_TOLERANCE: Decimal = dec!(0.01);

/// Role name -> share of the feature's hours
pub type ProfileAllocation = BTreeMap<String, Decimal>;

/// Partial update of a feature; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub complexity: Option<Complexity>,
    pub profile_allocation: Option<ProfileAllocation>,
    pub extra_hours: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FeatureRecord")]
pub struct Feature {
    id: FeatureId,
    module_id: ModuleId,
    name: String,
    description: String,
    complexity: Complexity,
    profile_allocation: ProfileAllocation,
    extra_hours: Decimal,
}

impl Feature {
    pub fn create(
        module_id: ModuleId,
        name: impl Into<String>,
        description: impl Into<String>,
        complexity: Complexity,
        profile_allocation: ProfileAllocation,
        extra_hours: Decimal,
    ) -> DomainResult<Self> {
        Self::reconstitute(
            FeatureId::new(),
            module_id,
            name.into(),
            description.into(),
            complexity,
            profile_allocation,
            extra_hours,
        )
    }

    pub fn reconstitute(
        id: FeatureId,
        module_id: ModuleId,
        name: String,
        description: String,
        complexity: Complexity,
        profile_allocation: ProfileAllocation,
        extra_hours: Decimal,
    ) -> DomainResult<Self> {
        Self::validate(&name, &profile_allocation, extra_hours)?;
        Ok(Self {
            id,
            module_id,
            name,
            description,
            complexity,
            profile_allocation,
            extra_hours,
        })
    }

    /// Apply the provided fields; nothing changes if the result is invalid
    pub fn update(&mut self, changes: FeatureUpdate) -> DomainResult<()> {
        let name = changes.name.unwrap_or_else(|| self.name.clone());
        let allocation = changes
            .profile_allocation
            .unwrap_or_else(|| self.profile_allocation.clone());
        let extra_hours = changes.extra_hours.unwrap_or(self.extra_hours);
        Self::validate(&name, &allocation, extra_hours)?;

        self.name = name;
        self.profile_allocation = allocation;
        self.extra_hours = extra_hours;
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(complexity) = changes.complexity {
            self.complexity = complexity;
        }
        Ok(())
    }

    fn validate(
        name: &str,
        allocation: &ProfileAllocation,
        extra_hours: Decimal,
    ) -> DomainResult<()> {
        require_non_blank("name", name)?;
        if extra_hours < Decimal::ZERO {
            return Err(DomainError::validation(
                "extra_hours",
                "Extra hours cannot be negative",
            ));
        }
        if allocation.values().any(|ratio| *ratio < Decimal::ZERO) {
            return Err(DomainError::validation(
                "profile_allocation",
                "Allocation ratios cannot be negative",
            ));
        }
        if !allocation.is_empty() {
            let total = checked_sum("profile_allocation", allocation.values().copied())?;
            if (total - Decimal::ONE).abs() > ALLOCATION_TOLERANCE {
                return Err(DomainError::validation(
                    "profile_allocation",
                    format!("Profile allocation must sum to 1.0, got {}", total),
                ));
            }
        }
        Ok(())
    }

    /// Rule hours plus the feature's extra hours
    ///
    /// # Errors
    /// `EstimationLookup` when the rule is for another complexity tier.
    pub fn estimated_hours(&self, rule: &EstimationRule) -> DomainResult<Decimal> {
        if rule.complexity() != self.complexity {
            return Err(DomainError::EstimationLookup {
                reason: format!(
                    "Estimation rule complexity {} doesn't match feature complexity {}",
                    rule.complexity(),
                    self.complexity
                ),
            });
        }
        checked_add("hours", rule.average_hours(), self.extra_hours)
    }

    /// Hours apportioned to each allocated role at that role's hourly rate
    ///
    /// # Errors
    /// `EstimationLookup` when an allocated role has no profile,
    /// `ValidationError` when the cost overflows.
    pub fn estimated_cost(
        &self,
        rule: &EstimationRule,
        profiles: &[Profile],
    ) -> DomainResult<Decimal> {
        let hours = self.estimated_hours(rule)?;
        let by_role: BTreeMap<&str, &Profile> =
            profiles.iter().map(|p| (p.role(), p)).collect();

        let mut cost = Decimal::ZERO;
        for (role, ratio) in &self.profile_allocation {
            let profile = by_role
                .get(role.as_str())
                .ok_or_else(|| DomainError::EstimationLookup {
                    reason: format!("Profile {} not found in available profiles", role),
                })?;
            let share = checked_mul("cost", hours, *ratio)?;
            cost = checked_add("cost", cost, checked_mul("cost", share, profile.hourly_rate())?)?;
        }
        Ok(cost)
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn profile_allocation(&self) -> &ProfileAllocation {
        &self.profile_allocation
    }

    pub fn extra_hours(&self) -> Decimal {
        self.extra_hours
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Feature {}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct FeatureRecord {
    id: FeatureId,
    module_id: ModuleId,
    name: String,
    description: String,
    complexity: Complexity,
    profile_allocation: ProfileAllocation,
    extra_hours: Decimal,
}

impl TryFrom<FeatureRecord> for Feature {
    type Error = DomainError;

    fn try_from(record: FeatureRecord) -> DomainResult<Self> {
        Feature::reconstitute(
            record.id,
            record.module_id,
            record.name,
            record.description,
            record.complexity,
            record.profile_allocation,
            record.extra_hours,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(pairs: &[(&str, Decimal)]) -> ProfileAllocation {
        pairs.iter().map(|(r, v)| (r.to_string(), *v)).collect()
    }

    fn feature(alloc: ProfileAllocation) -> DomainResult<Feature> {
        Feature::create(
            ModuleId::new(),
            "Login",
            "Email + password",
            Complexity::Medium,
            alloc,
            Decimal::ZERO,
        )
    }

    #[test]
    fn test_allocation_tolerance_boundaries() {
        assert!(feature(allocation(&[("dev", dec!(0.99))])).is_ok());
        assert!(feature(allocation(&[("dev", dec!(1.01))])).is_ok());
        assert!(feature(allocation(&[("dev", dec!(0.5))])).is_err());
        assert!(feature(allocation(&[("dev", dec!(0.6)), ("qa", dec!(0.4))])).is_ok());
        assert!(feature(ProfileAllocation::new()).is_ok());
    }

    #[test]
    fn test_negative_extra_hours_rejected() {
        let result = Feature::create(
            ModuleId::new(),
            "Login",
            "",
            Complexity::Simple,
            ProfileAllocation::new(),
            dec!(-1),
        );
        assert!(matches!(result, Err(DomainError::ValidationError { .. })));
    }

    #[test]
    fn test_update_revalidates_allocation() {
        let mut f = feature(allocation(&[("dev", dec!(1))])).unwrap();
        let result = f.update(FeatureUpdate {
            profile_allocation: Some(allocation(&[("dev", dec!(0.5))])),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(f.profile_allocation()["dev"], dec!(1));

        f.update(FeatureUpdate {
            extra_hours: Some(dec!(4)),
            complexity: Some(Complexity::Complex),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(f.extra_hours(), dec!(4));
        assert_eq!(f.complexity(), Complexity::Complex);
    }

    #[test]
    fn test_estimated_hours_and_cost() {
        let f = Feature::create(
            ModuleId::new(),
            "Login",
            "",
            Complexity::Medium,
            allocation(&[("dev", dec!(0.5)), ("qa", dec!(0.5))]),
            dec!(2),
        )
        .unwrap();
        let rule = EstimationRule::new(Complexity::Medium, dec!(10)).unwrap();
        let profiles = vec![
            Profile::new("dev", dec!(500), dec!(60)).unwrap(),
            Profile::new("qa", dec!(400), dec!(40)).unwrap(),
        ];

        assert_eq!(f.estimated_hours(&rule).unwrap(), dec!(12));
        // 6h * 60 + 6h * 40
        assert_eq!(f.estimated_cost(&rule, &profiles).unwrap(), dec!(600));
    }

    #[test]
    fn test_cost_overflow_is_validation_error() {
        let f = feature(allocation(&[("dev", dec!(1))])).unwrap();
        let rule = EstimationRule::new(Complexity::Medium, Decimal::MAX).unwrap();
        let profiles = vec![Profile::new("dev", dec!(500), dec!(60)).unwrap()];
        assert!(matches!(
            f.estimated_cost(&rule, &profiles),
            Err(DomainError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_mismatched_rule_is_lookup_error() {
        let f = feature(allocation(&[("dev", dec!(1))])).unwrap();
        let rule = EstimationRule::new(Complexity::Simple, dec!(4)).unwrap();
        assert!(matches!(
            f.estimated_hours(&rule),
            Err(DomainError::EstimationLookup { .. })
        ));
    }

    #[test]
    fn test_missing_profile_is_lookup_error() {
        let f = feature(allocation(&[("designer", dec!(1))])).unwrap();
        let rule = EstimationRule::new(Complexity::Medium, dec!(10)).unwrap();
        let profiles = vec![Profile::new("dev", dec!(500), dec!(60)).unwrap()];
        assert!(matches!(
            f.estimated_cost(&rule, &profiles),
            Err(DomainError::EstimationLookup { .. })
        ));
    }
}
