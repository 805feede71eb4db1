//! In-Memory Quote Repository Implementation

use async_trait::async_trait;
use tracing::debug;

use memory_business_domain::{
    errors::DomainResult,
    quote::Quote,
    repositories::QuoteRepository,
    value_objects::{ClientId, ProjectId, QuoteId},
};

use super::store::Store;
use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of QuoteRepository
#[derive(Debug, Default)]
pub struct InMemoryQuoteRepository {
    store: Store<Quote>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quotes(quotes: Vec<Quote>) -> Result<Self, PersistenceError> {
        Ok(Self {
            store: Store::from_items(quotes)?,
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
impl QuoteRepository for InMemoryQuoteRepository {
    async fn save(&self, quote: &Quote) -> DomainResult<Quote> {
        debug!(quote_id = %quote.id(), status = %quote.status(), "Saving quote");
        Ok(self.store.upsert(quote))
    }

    async fn find_by_id(&self, id: &QuoteId) -> DomainResult<Option<Quote>> {
        Ok(self.store.get(id))
    }

    async fn find_all(&self, skip: usize, limit: usize) -> DomainResult<Vec<Quote>> {
        Ok(self.store.page(skip, limit))
    }

    async fn find_by_client_id(&self, client_id: &ClientId) -> DomainResult<Vec<Quote>> {
        Ok(self.store.filter(|q| q.client_id() == *client_id))
    }

    async fn find_by_project_id(&self, project_id: &ProjectId) -> DomainResult<Vec<Quote>> {
        Ok(self.store.filter(|q| q.project_id() == Some(*project_id)))
    }

    async fn delete(&self, id: &QuoteId) -> DomainResult<bool> {
        let removed = self.store.remove(id);
        debug!(quote_id = %id, removed, "Deleting quote");
        Ok(removed)
    }

    async fn exists(&self, id: &QuoteId) -> DomainResult<bool> {
        Ok(self.store.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_business_domain::quote::QuoteItem;
    use memory_business_domain::value_objects::{Money, QuoteStatus};
    use rust_decimal_macros::dec;

    fn create_test_quote(client_id: ClientId, project_id: Option<ProjectId>) -> Quote {
        Quote::create(client_id, "Website build", "EUR", None, None, project_id).unwrap()
    }

    #[tokio::test]
    async fn test_save_keeps_items_and_status() {
        let repo = InMemoryQuoteRepository::new();
        let mut quote = create_test_quote(ClientId::new(), None);
        let item = QuoteItem::create(
            quote.id(),
            "Design",
            Money::new(dec!(100), "EUR").unwrap(),
            dec!(2),
        )
        .unwrap();
        quote.add_item(item).unwrap();
        quote.send().unwrap();

        repo.save(&quote).await.unwrap();

        let found = repo.find_by_id(&quote.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), QuoteStatus::Sent);
        assert_eq!(found.total_ttc().unwrap().amount(), dec!(240));
        assert!(found.pending_events().is_empty());
    }

    #[tokio::test]
    async fn test_finders() {
        let repo = InMemoryQuoteRepository::new();
        let client_id = ClientId::new();
        let project_id = ProjectId::new();

        repo.save(&create_test_quote(client_id, Some(project_id)))
            .await
            .unwrap();
        repo.save(&create_test_quote(client_id, None)).await.unwrap();
        repo.save(&create_test_quote(ClientId::new(), None))
            .await
            .unwrap();

        assert_eq!(repo.find_by_client_id(&client_id).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_project_id(&project_id).await.unwrap().len(), 1);
        assert!(repo
            .find_by_project_id(&ProjectId::new())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = InMemoryQuoteRepository::new();
        assert!(!repo.delete(&QuoteId::new()).await.unwrap());
    }

    #[test]
    fn test_json_snapshot_keeps_totals() {
        let mut quote = create_test_quote(ClientId::new(), None);
        let item = QuoteItem::create(
            quote.id(),
            "Audit",
            Money::new(dec!(1200), "EUR").unwrap(),
            dec!(1),
        )
        .unwrap();
        quote.add_item(item).unwrap();
        let repo = InMemoryQuoteRepository::with_quotes(vec![quote.clone()]).unwrap();

        let restored = InMemoryQuoteRepository::from_json(&repo.to_json().unwrap()).unwrap();
        let found = tokio_test::block_on(restored.find_by_id(&quote.id()))
            .unwrap()
            .unwrap();
        assert_eq!(found.total_ht().unwrap().amount(), dec!(1200));
    }

    #[test]
    fn test_json_snapshot_rejects_broken_quotes() {
        let mut quote = create_test_quote(ClientId::new(), None);
        let item = QuoteItem::create(
            quote.id(),
            "Audit",
            Money::new(dec!(100), "EUR").unwrap(),
            dec!(1),
        )
        .unwrap();
        quote.add_item(item).unwrap();
        let json = InMemoryQuoteRepository::with_quotes(vec![quote])
            .unwrap()
            .to_json()
            .unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut negative_price = snapshot.clone();
        negative_price[0]["items"][0]["unit_price"]["amount"] = "-100".into();
        let mut blank_title = snapshot;
        blank_title[0]["title"] = "   ".into();

        for broken in [negative_price, blank_title] {
            let result = InMemoryQuoteRepository::from_json(&broken.to_string());
            assert!(matches!(result, Err(PersistenceError::Deserialization(_))));
        }
    }
}
