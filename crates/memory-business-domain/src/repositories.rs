//! Repository interfaces for data persistence
//!
//! The domain defines only the contracts; storage crates implement them.
//! `save` is an upsert by id and returns the stored state. `find_all`
//! pages by offset and count in an implementation-defined but stable order.

use async_trait::async_trait;

use crate::{
    client::Client,
    errors::DomainResult,
    project::Project,
    quote::Quote,
    value_objects::{ClientId, ProjectId, QuoteId},
};

/// Repository for client aggregates
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert or replace a client
    async fn save(&self, client: &Client) -> DomainResult<Client>;

    async fn find_by_id(&self, id: &ClientId) -> DomainResult<Option<Client>>;

    /// Exact match on the stored email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Client>>;

    async fn find_all(&self, skip: usize, limit: usize) -> DomainResult<Vec<Client>>;

    /// Returns `true` if a client was removed
    async fn delete(&self, id: &ClientId) -> DomainResult<bool>;

    async fn exists(&self, id: &ClientId) -> DomainResult<bool>;
}

/// Repository for project aggregates, modules and features included
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn save(&self, project: &Project) -> DomainResult<Project>;

    async fn find_by_id(&self, id: &ProjectId) -> DomainResult<Option<Project>>;

    async fn find_all(&self, skip: usize, limit: usize) -> DomainResult<Vec<Project>>;

    /// Every project owned by a client
    async fn find_by_client_id(&self, client_id: &ClientId) -> DomainResult<Vec<Project>>;

    async fn delete(&self, id: &ProjectId) -> DomainResult<bool>;

    async fn exists(&self, id: &ProjectId) -> DomainResult<bool>;
}

/// Repository for quote aggregates, items included
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn save(&self, quote: &Quote) -> DomainResult<Quote>;

    async fn find_by_id(&self, id: &QuoteId) -> DomainResult<Option<Quote>>;

    async fn find_all(&self, skip: usize, limit: usize) -> DomainResult<Vec<Quote>>;

    async fn find_by_client_id(&self, client_id: &ClientId) -> DomainResult<Vec<Quote>>;

    async fn find_by_project_id(&self, project_id: &ProjectId) -> DomainResult<Vec<Quote>>;

    async fn delete(&self, id: &QuoteId) -> DomainResult<bool>;

    async fn exists(&self, id: &QuoteId) -> DomainResult<bool>;
}
