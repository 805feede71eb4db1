//! In-Memory Project Repository Implementation

use async_trait::async_trait;
use tracing::debug;

use memory_business_domain::{
    errors::DomainResult,
    project::Project,
    repositories::ProjectRepository,
    value_objects::{ClientId, ProjectId},
};

use super::store::Store;
use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of ProjectRepository
///
/// Projects are stored whole, modules and features included.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    store: Store<Project>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing projects (useful for testing)
    pub fn with_projects(projects: Vec<Project>) -> Result<Self, PersistenceError> {
        Ok(Self {
            store: Store::from_items(projects)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(Self {
            store: Store::from_json(json)?,
        })
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        self.store.to_json()
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    pub fn clear(&self) {
        self.store.clear();
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn save(&self, project: &Project) -> DomainResult<Project> {
        debug!(
            project_id = %project.id(),
            modules = project.modules().len(),
            "Saving project"
        );
        Ok(self.store.upsert(project))
    }

    async fn find_by_id(&self, id: &ProjectId) -> DomainResult<Option<Project>> {
        Ok(self.store.get(id))
    }

    async fn find_all(&self, skip: usize, limit: usize) -> DomainResult<Vec<Project>> {
        Ok(self.store.page(skip, limit))
    }

    async fn find_by_client_id(&self, client_id: &ClientId) -> DomainResult<Vec<Project>> {
        Ok(self.store.filter(|p| p.client_id() == *client_id))
    }

    async fn delete(&self, id: &ProjectId) -> DomainResult<bool> {
        let removed = self.store.remove(id);
        debug!(project_id = %id, removed, "Deleting project");
        Ok(removed)
    }

    async fn exists(&self, id: &ProjectId) -> DomainResult<bool> {
        Ok(self.store.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use memory_business_domain::project::{Feature, Module};
    use memory_business_domain::value_objects::Complexity;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn create_test_project(client_id: ClientId, name: &str) -> Project {
        Project::create(
            client_id,
            name,
            "Test project",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_keeps_modules_and_features() {
        let repo = InMemoryProjectRepository::new();
        let mut project = create_test_project(ClientId::new(), "Website");
        let module = Module::create(project.id(), "Auth").unwrap();
        let module_id = module.id();
        project.add_module(module).unwrap();
        let feature = Feature::create(
            module_id,
            "Login",
            "",
            Complexity::Simple,
            BTreeMap::from([("dev".to_string(), dec!(1))]),
            dec!(0),
        )
        .unwrap();
        project.add_feature(module_id, feature).unwrap();

        repo.save(&project).await.unwrap();

        let found = repo.find_by_id(&project.id()).await.unwrap().unwrap();
        assert_eq!(found.modules().len(), 1);
        assert_eq!(found.module(module_id).unwrap().features().len(), 1);
        assert!(found.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_client_id() {
        let repo = InMemoryProjectRepository::new();
        let client_a = ClientId::new();
        let client_b = ClientId::new();

        repo.save(&create_test_project(client_a, "a-1")).await.unwrap();
        repo.save(&create_test_project(client_a, "a-2")).await.unwrap();
        repo.save(&create_test_project(client_b, "b-1")).await.unwrap();

        let projects = repo.find_by_client_id(&client_a).await.unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|p| p.client_id() == client_a));
    }

    #[tokio::test]
    async fn test_find_all_pages() {
        let repo = InMemoryProjectRepository::new();
        let client_id = ClientId::new();
        for i in 0..5 {
            repo.save(&create_test_project(client_id, &format!("p{}", i)))
                .await
                .unwrap();
        }

        let first = repo.find_all(0, 2).await.unwrap();
        let rest = repo.find_all(2, 10).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 3);
        assert!(first.iter().all(|p| !rest.contains(p)));
        assert!(repo.find_all(5, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_and_clear() {
        let repo = InMemoryProjectRepository::new();
        assert_eq!(repo.count(), 0);

        repo.save(&create_test_project(ClientId::new(), "p1"))
            .await
            .unwrap();
        repo.save(&create_test_project(ClientId::new(), "p2"))
            .await
            .unwrap();
        assert_eq!(repo.count(), 2);

        repo.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_with_initial_projects() {
        let projects = vec![
            create_test_project(ClientId::new(), "init-1"),
            create_test_project(ClientId::new(), "init-2"),
        ];
        let repo = InMemoryProjectRepository::with_projects(projects).unwrap();

        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_json_snapshot_revalidates_allocation() {
        let mut project = create_test_project(ClientId::new(), "Website");
        let module = Module::create(project.id(), "Auth").unwrap();
        let module_id = module.id();
        project.add_module(module).unwrap();
        let feature = Feature::create(
            module_id,
            "Login",
            "",
            Complexity::Medium,
            BTreeMap::from([("dev".to_string(), dec!(1))]),
            dec!(0),
        )
        .unwrap();
        project.add_feature(module_id, feature).unwrap();
        let json = InMemoryProjectRepository::with_projects(vec![project])
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(InMemoryProjectRepository::from_json(&json).unwrap().count(), 1);

        let mut snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();
        snapshot[0]["modules"][0]["features"][0]["profile_allocation"]["dev"] = "0.3".into();

        let result = InMemoryProjectRepository::from_json(&snapshot.to_string());
        assert!(matches!(result, Err(PersistenceError::Deserialization(_))));
    }
}
