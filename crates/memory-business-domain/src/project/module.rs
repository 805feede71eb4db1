//! Module entity: a named group of features inside a project

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::feature::Feature;
use crate::errors::{checked_add, require_non_blank, DomainError, DomainResult};
use crate::value_objects::{
    Complexity, EstimationRule, FeatureId, ModuleId, Profile, ProjectId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ModuleRecord")]
pub struct Module {
    id: ModuleId,
    project_id: ProjectId,
    name: String,
    features: Vec<Feature>,
}

impl Module {
    pub fn create(project_id: ProjectId, name: impl Into<String>) -> DomainResult<Self> {
        Self::reconstitute(ModuleId::new(), project_id, name.into(), Vec::new())
    }

    /// Rebuild a stored module; every feature must point at this module
    pub fn reconstitute(
        id: ModuleId,
        project_id: ProjectId,
        name: String,
        features: Vec<Feature>,
    ) -> DomainResult<Self> {
        require_non_blank("name", &name)?;
        let mut module = Self {
            id,
            project_id,
            name,
            features: Vec::with_capacity(features.len()),
        };
        for feature in features {
            module.add_feature(feature)?;
        }
        Ok(module)
    }

    /// Attach a feature
    ///
    /// # Errors
    /// `OwnershipViolation` if the feature was created for another module.
    pub fn add_feature(&mut self, feature: Feature) -> DomainResult<()> {
        if feature.module_id() != self.id {
            return Err(DomainError::OwnershipViolation {
                child: format!("Feature {}", feature.id()),
                parent: format!("Module {}", self.id),
            });
        }
        self.features.push(feature);
        Ok(())
    }

    /// Returns `true` if a feature was removed
    pub fn remove_feature(&mut self, feature_id: FeatureId) -> bool {
        let before = self.features.len();
        self.features.retain(|f| f.id() != feature_id);
        self.features.len() != before
    }

    pub fn update(&mut self, name: Option<String>) -> DomainResult<()> {
        if let Some(name) = name {
            require_non_blank("name", &name)?;
            self.name = name;
        }
        Ok(())
    }

    /// Sum of the estimated hours of every feature
    pub fn total_hours(&self, rules: &[EstimationRule]) -> DomainResult<Decimal> {
        let rules = rules_by_complexity(rules);
        let mut hours = Decimal::ZERO;
        for feature in &self.features {
            hours = checked_add("hours", hours, feature.estimated_hours(rule_for(&rules, feature)?)?)?;
        }
        Ok(hours)
    }

    /// Sum of the estimated cost of every feature
    pub fn total_cost(&self, rules: &[EstimationRule], profiles: &[Profile]) -> DomainResult<Decimal> {
        let rules = rules_by_complexity(rules);
        let mut cost = Decimal::ZERO;
        for feature in &self.features {
            let feature_cost = feature.estimated_cost(rule_for(&rules, feature)?, profiles)?;
            cost = checked_add("cost", cost, feature_cost)?;
        }
        Ok(cost)
    }

    pub fn feature(&self, feature_id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == feature_id)
    }

    pub fn feature_mut(&mut self, feature_id: FeatureId) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.id() == feature_id)
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Module {}

impl Hash for Module {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct ModuleRecord {
    id: ModuleId,
    project_id: ProjectId,
    name: String,
    features: Vec<Feature>,
}

impl TryFrom<ModuleRecord> for Module {
    type Error = DomainError;

    fn try_from(record: ModuleRecord) -> DomainResult<Self> {
        Module::reconstitute(record.id, record.project_id, record.name, record.features)
    }
}

/// Later rules win when a tier is listed twice
fn rules_by_complexity(rules: &[EstimationRule]) -> BTreeMap<Complexity, &EstimationRule> {
    rules.iter().map(|r| (r.complexity(), r)).collect()
}

fn rule_for<'a>(
    rules: &BTreeMap<Complexity, &'a EstimationRule>,
    feature: &Feature,
) -> DomainResult<&'a EstimationRule> {
    rules
        .get(&feature.complexity())
        .copied()
        .ok_or_else(|| DomainError::EstimationLookup {
            reason: format!(
                "No estimation rule found for complexity {}",
                feature.complexity()
            ),
        })
}
