//! Project aggregate root
//!
//! A project belongs to a client and owns its modules, which in turn own
//! their features. Children are only reachable through the project, and
//! attaching a child checks that it was created for that parent.

mod feature;
mod module;

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use feature::{Feature, FeatureUpdate, ProfileAllocation};
pub use module::Module;

use crate::errors::{checked_add, checked_sum, require_non_blank, DomainError, DomainResult};
use crate::events::{
    EventLog, ProjectCompleted, ProjectCreated, ProjectDeleted, ProjectEvent, ProjectUpdated,
};
use crate::value_objects::{
    ClientId, EstimationRule, ModuleId, OverheadPercentage, Profile, ProjectEstimation,
    ProjectId, ProjectPeriod, ProjectStatus,
};

/// Partial update of a project; `None` leaves the field untouched
///
/// Changing either date rebuilds the period, so the pair is re-validated.
/// An end date cannot be cleared through an update: `end_date: None` keeps
/// the current one, so an open-ended project stays open-ended only until an
/// end date is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Project aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord")]
pub struct Project {
    id: ProjectId,
    client_id: ClientId,
    name: String,
    description: String,
    status: ProjectStatus,
    period: ProjectPeriod,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    modules: Vec<Module>,
    #[serde(skip)]
    events: EventLog<ProjectEvent>,
}

impl Project {
    /// Create a `planned` project and record `ProjectCreated`
    pub fn create(
        client_id: ClientId,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        Self::create_with_status(
            client_id,
            name,
            description,
            start_date,
            end_date,
            ProjectStatus::Planned,
        )
    }

    /// Same as [`Project::create`] with an explicit initial status
    pub fn create_with_status(
        client_id: ClientId,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        status: ProjectStatus,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let period = ProjectPeriod::new(start_date, end_date)?;
        let mut project = Self::reconstitute(
            ProjectId::new(),
            client_id,
            name.into(),
            description.into(),
            status,
            period,
            now,
            now,
            Vec::new(),
        )?;

        project
            .events
            .record(ProjectEvent::Created(ProjectCreated::new(
                project.id.as_uuid(),
                client_id.as_uuid(),
                project.name.clone(),
                status,
                now,
            )));
        Ok(project)
    }

    /// Rebuild a stored project. Validates, records no event.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProjectId,
        client_id: ClientId,
        name: String,
        description: String,
        status: ProjectStatus,
        period: ProjectPeriod,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        modules: Vec<Module>,
    ) -> DomainResult<Self> {
        Self::validate(&name, &description)?;
        let mut project = Self {
            id,
            client_id,
            name,
            description,
            status,
            period,
            created_at,
            updated_at,
            modules: Vec::with_capacity(modules.len()),
            events: EventLog::default(),
        };
        for module in modules {
            project.add_module(module)?;
        }
        Ok(project)
    }

    /// Apply the provided fields and record `ProjectUpdated`
    ///
    /// The project is left untouched when the merged values are invalid.
    pub fn update(&mut self, changes: ProjectUpdate) -> DomainResult<()> {
        let name = changes.name.unwrap_or_else(|| self.name.clone());
        let description = changes
            .description
            .unwrap_or_else(|| self.description.clone());
        Self::validate(&name, &description)?;

        let period = if changes.start_date.is_some() || changes.end_date.is_some() {
            ProjectPeriod::new(
                changes.start_date.unwrap_or(self.period.start_date()),
                changes.end_date.or(self.period.end_date()),
            )?
        } else {
            self.period
        };

        self.name = name;
        self.description = description;
        self.period = period;
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Utc::now();

        self.events.record(ProjectEvent::Updated(ProjectUpdated::new(
            self.id.as_uuid(),
            self.name.clone(),
            self.status,
            self.updated_at,
        )));
        Ok(())
    }

    /// Force the status to `completed`
    pub fn complete(&mut self) {
        self.status = ProjectStatus::Completed;
        self.updated_at = Utc::now();
        self.events.record(ProjectEvent::Completed(ProjectCompleted::new(
            self.id.as_uuid(),
            self.updated_at,
        )));
    }

    /// Record `ProjectDeleted`; removal itself is the repository's job
    pub fn mark_as_deleted(&mut self) {
        self.events.record(ProjectEvent::Deleted(ProjectDeleted::new(
            self.id.as_uuid(),
            Utc::now(),
        )));
    }

    fn validate(name: &str, description: &str) -> DomainResult<()> {
        require_non_blank("name", name)?;
        require_non_blank("description", description)
    }

    // === Modules ===

    /// # Errors
    /// `OwnershipViolation` if the module was created for another project.
    pub fn add_module(&mut self, module: Module) -> DomainResult<()> {
        if module.project_id() != self.id {
            return Err(DomainError::OwnershipViolation {
                child: format!("Module {}", module.id()),
                parent: format!("Project {}", self.id),
            });
        }
        self.modules.push(module);
        Ok(())
    }

    /// Returns `true` if a module was removed
    pub fn remove_module(&mut self, module_id: ModuleId) -> bool {
        let before = self.modules.len();
        self.modules.retain(|m| m.id() != module_id);
        self.modules.len() != before
    }

    /// Attach a feature to one of this project's modules
    pub fn add_feature(&mut self, module_id: ModuleId, feature: Feature) -> DomainResult<()> {
        let project_id = self.id;
        self.module_mut(module_id)
            .ok_or_else(|| DomainError::OwnershipViolation {
                child: format!("Module {}", module_id),
                parent: format!("Project {}", project_id),
            })?
            .add_feature(feature)
    }

    pub fn module(&self, module_id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id() == module_id)
    }

    pub fn module_mut(&mut self, module_id: ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id() == module_id)
    }

    // === Estimation ===

    /// Roll up hours and cost over every module, then add overheads
    ///
    /// Each overhead is computed from the pre-overhead cost; overheads do not
    /// compound. Any missing rule or profile aborts the whole computation, as
    /// does an hour or cost total that overflows.
    pub fn calculate_estimation(
        &self,
        rules: &[EstimationRule],
        profiles: &[Profile],
        overheads: &[OverheadPercentage],
    ) -> DomainResult<ProjectEstimation> {
        let mut total_hours = Decimal::ZERO;
        let mut base_cost = Decimal::ZERO;
        for module in &self.modules {
            total_hours = checked_add("hours", total_hours, module.total_hours(rules)?)?;
            base_cost = checked_add("cost", base_cost, module.total_cost(rules, profiles)?)?;
        }

        let overhead_cost = checked_sum("cost", overheads.iter().map(|o| o.apply_to(base_cost)))?;

        let mut details = BTreeMap::new();
        details.insert("modules_count".to_string(), self.modules.len().into());
        details.insert(
            "total_features".to_string(),
            self.modules
                .iter()
                .map(|m| m.features().len())
                .sum::<usize>()
                .into(),
        );

        ProjectEstimation::new(
            total_hours,
            checked_add("cost", base_cost, overhead_cost)?,
            details,
        )
    }

    // === Events ===

    pub fn pending_events(&self) -> &[ProjectEvent] {
        self.events.pending()
    }

    pub fn take_events(&mut self) -> Vec<ProjectEvent> {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // === Getters ===

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn period(&self) -> ProjectPeriod {
        self.period
    }

    pub fn start_date(&self) -> NaiveDate {
        self.period.start_date()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.period.end_date()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Project {}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.status)
    }
}

/// Stored shape of a project, rebuilt through [`Project::reconstitute`]
#[derive(Deserialize)]
struct ProjectRecord {
    id: ProjectId,
    client_id: ClientId,
    name: String,
    description: String,
    status: ProjectStatus,
    period: ProjectPeriod,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    modules: Vec<Module>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = DomainError;

    fn try_from(record: ProjectRecord) -> DomainResult<Self> {
        Project::reconstitute(
            record.id,
            record.client_id,
            record.name,
            record.description,
            record.status,
            record.period,
            record.created_at,
            record.updated_at,
            record.modules,
        )
    }
}
