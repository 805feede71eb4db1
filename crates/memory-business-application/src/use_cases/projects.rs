//! Project use cases, modules and features included

use std::sync::Arc;

use tracing::{debug, info, warn};

use memory_business_domain::project::{Feature, Module, Project};
use memory_business_domain::repositories::ProjectRepository;
use memory_business_domain::value_objects::{ClientId, ModuleId, ProjectId, ProjectStatus};

use crate::dto::{
    parse_id, AddFeatureCommand, AddModuleCommand, CreateProjectCommand, EstimateProjectCommand,
    FeatureDto, ModuleDto, ProjectDto, ProjectEstimationDto, UpdateProjectCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{publish_all, EventPublisher};
use crate::policy::Pagination;

async fn load_project<R: ProjectRepository + ?Sized>(
    repository: &R,
    raw_id: &str,
) -> ApplicationResult<Project> {
    let id = parse_id("project_id", raw_id, ProjectId::from_string)?;
    repository.find_by_id(&id).await?.ok_or_else(|| {
        warn!(project_id = %id, "Project not found");
        ApplicationError::not_found("Project", id)
    })
}

command_use_case!(CreateProject, ProjectRepository);

impl<R, E> CreateProject<R, E>
where
    R: ProjectRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(&self, cmd: CreateProjectCommand) -> ApplicationResult<ProjectDto> {
        let client_id = parse_id("client_id", &cmd.client_id, ClientId::from_string)?;
        let mut project = Project::create_with_status(
            client_id,
            cmd.name,
            cmd.description,
            cmd.start_date,
            cmd.end_date,
            cmd.status.unwrap_or(ProjectStatus::Planned),
        )?;

        let saved = self.repository.save(&project).await?;
        publish_all(self.events.as_ref(), project.take_events()).await;

        info!(project_id = %saved.id(), client_id = %client_id, "Project created");
        Ok(ProjectDto::from_domain(&saved))
    }
}

query_use_case!(GetProject, ProjectRepository);

impl<R: ProjectRepository + ?Sized> GetProject<R> {
    pub async fn execute(&self, project_id: &str) -> ApplicationResult<ProjectDto> {
        let project = load_project(self.repository.as_ref(), project_id).await?;
        Ok(ProjectDto::from_domain(&project))
    }
}

/// Page through projects, oldest first
pub struct ListProjects<R: ?Sized> {
    repository: Arc<R>,
    pagination: Pagination,
}

impl<R: ProjectRepository + ?Sized> ListProjects<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_pagination(repository, Pagination::default())
    }

    pub fn with_pagination(repository: Arc<R>, pagination: Pagination) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    pub async fn execute(
        &self,
        skip: usize,
        limit: Option<usize>,
    ) -> ApplicationResult<Vec<ProjectDto>> {
        let limit = self.pagination.resolve(limit);
        debug!(skip, limit, "Listing projects");
        let projects = self.repository.find_all(skip, limit).await?;
        Ok(projects.iter().map(ProjectDto::from_domain).collect())
    }
}

query_use_case!(
    /// Every project of one client
    ListProjectsByClient,
    ProjectRepository
);

impl<R: ProjectRepository + ?Sized> ListProjectsByClient<R> {
    pub async fn execute(&self, client_id: &str) -> ApplicationResult<Vec<ProjectDto>> {
        let client_id = parse_id("client_id", client_id, ClientId::from_string)?;
        let projects = self.repository.find_by_client_id(&client_id).await?;
        Ok(projects.iter().map(ProjectDto::from_domain).collect())
    }
}

command_use_case!(UpdateProject, ProjectRepository);

impl<R, E> UpdateProject<R, E>
where
    R: ProjectRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        project_id: &str,
        cmd: UpdateProjectCommand,
    ) -> ApplicationResult<ProjectDto> {
        let mut project = load_project(self.repository.as_ref(), project_id).await?;
        project.update(cmd.into())?;

        let saved = self.repository.save(&project).await?;
        publish_all(self.events.as_ref(), project.take_events()).await;

        info!(project_id = %saved.id(), "Project updated");
        Ok(ProjectDto::from_domain(&saved))
    }
}

command_use_case!(
    /// Move a project to `completed`
    CompleteProject,
    ProjectRepository
);

impl<R, E> CompleteProject<R, E>
where
    R: ProjectRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(&self, project_id: &str) -> ApplicationResult<ProjectDto> {
        let mut project = load_project(self.repository.as_ref(), project_id).await?;
        project.complete();

        let saved = self.repository.save(&project).await?;
        publish_all(self.events.as_ref(), project.take_events()).await;

        info!(project_id = %saved.id(), "Project completed");
        Ok(ProjectDto::from_domain(&saved))
    }
}

command_use_case!(DeleteProject, ProjectRepository);

impl<R, E> DeleteProject<R, E>
where
    R: ProjectRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(&self, project_id: &str) -> ApplicationResult<bool> {
        let mut project = load_project(self.repository.as_ref(), project_id).await?;
        project.mark_as_deleted();

        let deleted = self.repository.delete(&project.id()).await?;
        publish_all(self.events.as_ref(), project.take_events()).await;

        info!(project_id = %project.id(), deleted, "Project deleted");
        Ok(deleted)
    }
}

command_use_case!(AddModule, ProjectRepository);

impl<R, E> AddModule<R, E>
where
    R: ProjectRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        project_id: &str,
        cmd: AddModuleCommand,
    ) -> ApplicationResult<ModuleDto> {
        let mut project = load_project(self.repository.as_ref(), project_id).await?;
        let module = Module::create(project.id(), cmd.name)?;
        let module_id = module.id();
        project.add_module(module)?;

        let saved = self.repository.save(&project).await?;
        publish_all(self.events.as_ref(), project.take_events()).await;

        info!(project_id = %saved.id(), module_id = %module_id, "Module added");
        saved
            .module(module_id)
            .map(ModuleDto::from_domain)
            .ok_or_else(|| ApplicationError::not_found("Module", module_id))
    }
}

command_use_case!(
    /// Attach a feature to an existing module of the project
    AddFeature,
    ProjectRepository
);

impl<R, E> AddFeature<R, E>
where
    R: ProjectRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        project_id: &str,
        cmd: AddFeatureCommand,
    ) -> ApplicationResult<FeatureDto> {
        let mut project = load_project(self.repository.as_ref(), project_id).await?;
        let module_id = parse_id("module_id", &cmd.module_id, ModuleId::from_string)?;
        let feature = Feature::create(
            module_id,
            cmd.name,
            cmd.description,
            cmd.complexity,
            cmd.profile_allocation,
            cmd.extra_hours,
        )?;
        let feature_id = feature.id();
        project.add_feature(module_id, feature)?;

        let saved = self.repository.save(&project).await?;
        publish_all(self.events.as_ref(), project.take_events()).await;

        info!(project_id = %saved.id(), feature_id = %feature_id, "Feature added");
        saved
            .module(module_id)
            .and_then(|m| m.feature(feature_id))
            .map(FeatureDto::from_domain)
            .ok_or_else(|| ApplicationError::not_found("Feature", feature_id))
    }
}

query_use_case!(
    /// Hours and cost of a stored project for the given rules, profiles and overheads
    EstimateProject,
    ProjectRepository
);

impl<R: ProjectRepository + ?Sized> EstimateProject<R> {
    pub async fn execute(
        &self,
        project_id: &str,
        cmd: EstimateProjectCommand,
    ) -> ApplicationResult<ProjectEstimationDto> {
        let project = load_project(self.repository.as_ref(), project_id).await?;
        let (rules, profiles, overheads) = cmd.into_domain()?;

        let estimation = project
            .calculate_estimation(&rules, &profiles, &overheads)
            .map_err(|err| {
                warn!(project_id = %project.id(), error = %err, "Estimation failed");
                ApplicationError::from(err)
            })?;

        debug!(
            project_id = %project.id(),
            hours = %estimation.total_hours(),
            cost = %estimation.total_cost(),
            "Project estimated"
        );
        Ok(ProjectEstimationDto::from_domain(&estimation))
    }
}
