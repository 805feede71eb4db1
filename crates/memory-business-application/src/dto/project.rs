//! Project-related DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use memory_business_domain::errors::DomainResult;
use memory_business_domain::project::{Feature, Module, Project, ProjectUpdate};
use memory_business_domain::value_objects::{
    Complexity, EstimationRule, OverheadPercentage, Profile, ProjectEstimation, ProjectStatus,
};

/// Command to create a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectCommand {
    pub client_id: String,
    pub name: String,
    pub description: String,
    /// Defaults to `planned`
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateProjectCommand> for ProjectUpdate {
    fn from(cmd: UpdateProjectCommand) -> Self {
        ProjectUpdate {
            name: cmd.name,
            description: cmd.description,
            status: cmd.status,
            start_date: cmd.start_date,
            end_date: cmd.end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddModuleCommand {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFeatureCommand {
    pub module_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub complexity: Complexity,
    #[serde(default)]
    pub profile_allocation: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub extra_hours: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationRuleDto {
    pub complexity: Complexity,
    pub average_hours: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    pub role: String,
    pub daily_rate: Decimal,
    pub hourly_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverheadDto {
    pub kind: String,
    pub rate: Decimal,
}

/// Inputs of a project estimation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateProjectCommand {
    pub rules: Vec<EstimationRuleDto>,
    pub profiles: Vec<ProfileDto>,
    #[serde(default)]
    pub overheads: Vec<OverheadDto>,
}

impl EstimateProjectCommand {
    pub(crate) fn into_domain(
        self,
    ) -> DomainResult<(Vec<EstimationRule>, Vec<Profile>, Vec<OverheadPercentage>)> {
        let rules = self
            .rules
            .into_iter()
            .map(|r| EstimationRule::new(r.complexity, r.average_hours))
            .collect::<DomainResult<Vec<_>>>()?;
        let profiles = self
            .profiles
            .into_iter()
            .map(|p| Profile::new(p.role, p.daily_rate, p.hourly_rate))
            .collect::<DomainResult<Vec<_>>>()?;
        let overheads = self
            .overheads
            .into_iter()
            .map(|o| OverheadPercentage::new(o.kind, o.rate))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((rules, profiles, overheads))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDto {
    pub id: String,
    pub module_id: String,
    pub name: String,
    pub description: String,
    pub complexity: Complexity,
    pub profile_allocation: BTreeMap<String, Decimal>,
    pub extra_hours: Decimal,
}

impl FeatureDto {
    pub fn from_domain(feature: &Feature) -> Self {
        Self {
            id: feature.id().to_string(),
            module_id: feature.module_id().to_string(),
            name: feature.name().to_string(),
            description: feature.description().to_string(),
            complexity: feature.complexity(),
            profile_allocation: feature.profile_allocation().clone(),
            extra_hours: feature.extra_hours(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDto {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub features: Vec<FeatureDto>,
}

impl ModuleDto {
    pub fn from_domain(module: &Module) -> Self {
        Self {
            id: module.id().to_string(),
            project_id: module.project_id().to_string(),
            name: module.name().to_string(),
            features: module.features().iter().map(FeatureDto::from_domain).collect(),
        }
    }
}

/// Project DTO, modules and features included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<ModuleDto>,
}

impl ProjectDto {
    pub fn from_domain(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            client_id: project.client_id().to_string(),
            name: project.name().to_string(),
            description: project.description().to_string(),
            status: project.status(),
            start_date: project.start_date(),
            end_date: project.end_date(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
            modules: project.modules().iter().map(ModuleDto::from_domain).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEstimationDto {
    pub total_hours: Decimal,
    pub total_cost: Decimal,
    pub details: BTreeMap<String, serde_json::Value>,
}

impl ProjectEstimationDto {
    pub fn from_domain(estimation: &ProjectEstimation) -> Self {
        Self {
            total_hours: estimation.total_hours(),
            total_cost: estimation.total_cost(),
            details: estimation.details().clone(),
        }
    }
}
