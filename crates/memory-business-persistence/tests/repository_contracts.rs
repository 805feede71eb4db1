//! Repository contract tests
//!
//! Behaviour every repository implementation must share, exercised through
//! the domain traits as trait objects.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;

use memory_business_domain::client::Client;
use memory_business_domain::project::Project;
use memory_business_domain::quote::Quote;
use memory_business_domain::repositories::{ClientRepository, ProjectRepository, QuoteRepository};
use memory_business_domain::value_objects::{Address, ClientId};
use memory_business_persistence::{
    InMemoryClientRepository, InMemoryProjectRepository, InMemoryQuoteRepository,
};

fn client(n: usize) -> Client {
    Client::create(
        format!("Client {}", n),
        "Contact",
        format!("c{}@example.test", n),
        "+33 1 00 00 00 00",
        Address::new("1 Main St", "Lyon", "69001", "France").unwrap(),
    )
    .unwrap()
}

fn project(client_id: ClientId) -> Project {
    Project::create(
        client_id,
        "Website",
        "Corporate website",
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn test_save_returns_clean_copy_through_trait_object() {
    let clients: Arc<dyn ClientRepository> = Arc::new(InMemoryClientRepository::new());
    let projects: Arc<dyn ProjectRepository> = Arc::new(InMemoryProjectRepository::new());
    let quotes: Arc<dyn QuoteRepository> = Arc::new(InMemoryQuoteRepository::new());

    let c = client(1);
    let p = project(c.id());
    let q = Quote::create(c.id(), "Build", "EUR", None, None, Some(p.id())).unwrap();

    assert!(clients.save(&c).await.unwrap().pending_events().is_empty());
    assert!(projects.save(&p).await.unwrap().pending_events().is_empty());
    assert!(quotes.save(&q).await.unwrap().pending_events().is_empty());

    assert!(clients.exists(&c.id()).await.unwrap());
    assert!(projects.exists(&p.id()).await.unwrap());
    assert!(quotes.exists(&q.id()).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_are_all_kept() {
    let repo = Arc::new(InMemoryClientRepository::new());

    let handles: Vec<_> = (0..32)
        .map(|n| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.save(&client(n)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.count(), 32);
}

#[tokio::test]
async fn test_last_writer_wins() {
    let repo = InMemoryProjectRepository::new();
    let original = project(ClientId::new());
    repo.save(&original).await.unwrap();

    let mut first = original.clone();
    let mut second = original.clone();
    first
        .update(memory_business_domain::project::ProjectUpdate {
            name: Some("First".into()),
            ..Default::default()
        })
        .unwrap();
    second
        .update(memory_business_domain::project::ProjectUpdate {
            name: Some("Second".into()),
            ..Default::default()
        })
        .unwrap();

    repo.save(&first).await.unwrap();
    repo.save(&second).await.unwrap();

    let stored = repo.find_by_id(&original.id()).await.unwrap().unwrap();
    assert_eq!(stored.name(), "Second");
    assert_eq!(repo.count(), 1);
}

proptest! {
    #[test]
    fn pages_cover_every_client_once(total in 0usize..20, page_size in 1usize..7) {
        let repo = InMemoryClientRepository::new();
        let mut expected = HashSet::new();
        for n in 0..total {
            let c = client(n);
            expected.insert(c.id());
            tokio_test::block_on(repo.save(&c)).unwrap();
        }

        let mut seen = HashSet::new();
        let mut skip = 0;
        loop {
            let page = tokio_test::block_on(repo.find_all(skip, page_size)).unwrap();
            prop_assert!(page.len() <= page_size);
            if page.is_empty() {
                break;
            }
            for c in &page {
                prop_assert!(seen.insert(c.id()), "client returned twice");
            }
            skip += page.len();
        }

        prop_assert_eq!(seen, expected);
    }
}
