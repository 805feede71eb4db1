//! In-Memory Client Repository Implementation

use async_trait::async_trait;
use tracing::debug;

use memory_business_domain::{
    client::Client,
    errors::DomainResult,
    repositories::ClientRepository,
    value_objects::ClientId,
};

use super::store::Store;
use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of ClientRepository
///
/// Email lookups are exact matches on the stored value.
///
/// # Example
///
/// ```ignore
/// use memory_business_persistence::memory::InMemoryClientRepository;
/// use memory_business_domain::repositories::ClientRepository;
/// use std::sync::Arc;
///
/// let repo: Arc<dyn ClientRepository> = Arc::new(InMemoryClientRepository::new());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    store: Store<Client>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing clients; fails on a repeated id
    pub fn with_clients(clients: Vec<Client>) -> Result<Self, PersistenceError> {
        Ok(Self {
            store: Store::from_items(clients)?,
        })
    }

    /// Restore from [`InMemoryClientRepository::to_json`] output
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
impl ClientRepository for InMemoryClientRepository {
    async fn save(&self, client: &Client) -> DomainResult<Client> {
        debug!(client_id = %client.id(), "Saving client");
        Ok(self.store.upsert(client))
    }

    async fn find_by_id(&self, id: &ClientId) -> DomainResult<Option<Client>> {
        Ok(self.store.get(id))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Client>> {
        Ok(self.store.find(|c| c.email() == email))
    }

    async fn find_all(&self, skip: usize, limit: usize) -> DomainResult<Vec<Client>> {
        Ok(self.store.page(skip, limit))
    }

    async fn delete(&self, id: &ClientId) -> DomainResult<bool> {
        let removed = self.store.remove(id);
        debug!(client_id = %id, removed, "Deleting client");
        Ok(removed)
    }

    async fn exists(&self, id: &ClientId) -> DomainResult<bool> {
        Ok(self.store.contains(id))
    }
}
