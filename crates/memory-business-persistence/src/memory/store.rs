//! Shared map behind every in-memory repository

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use memory_business_domain::client::Client;
use memory_business_domain::project::Project;
use memory_business_domain::quote::Quote;
use memory_business_domain::value_objects::{ClientId, ProjectId, QuoteId};

use crate::error::PersistenceError;

/// Aggregate root that can live in a [`Store`]
pub(crate) trait Stored: Clone + fmt::Debug + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display;

    const ENTITY: &'static str;

    fn key(&self) -> Self::Id;

    fn created(&self) -> DateTime<Utc>;

    /// Copy kept by the store; pending events never leave the aggregate
    fn detached(&self) -> Self;
}

impl Stored for Client {
    type Id = ClientId;
    const ENTITY: &'static str = "Client";

    fn key(&self) -> ClientId {
        self.id()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at()
    }

    fn detached(&self) -> Self {
        let mut copy = self.clone();
        copy.clear_events();
        copy
    }
}

impl Stored for Project {
    type Id = ProjectId;
    const ENTITY: &'static str = "Project";

    fn key(&self) -> ProjectId {
        self.id()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at()
    }

    fn detached(&self) -> Self {
        let mut copy = self.clone();
        copy.clear_events();
        copy
    }
}

impl Stored for Quote {
    type Id = QuoteId;
    const ENTITY: &'static str = "Quote";

    fn key(&self) -> QuoteId {
        self.id()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created_at()
    }

    fn detached(&self) -> Self {
        let mut copy = self.clone();
        copy.clear_events();
        copy
    }
}

/// Lock-guarded map from id to aggregate
///
/// No lock is held across an `.await`; every method takes and releases the
/// lock synchronously.
#[derive(Debug)]
pub(crate) struct Store<T: Stored> {
    items: RwLock<HashMap<T::Id, T>>,
}

impl<T: Stored> Default for Store<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Stored> Store<T> {
    /// Build from existing aggregates; ids must be unique
    pub fn from_items(items: Vec<T>) -> Result<Self, PersistenceError> {
        let mut map = HashMap::with_capacity(items.len());
        for item in items {
            let id = item.key();
            if map.insert(id, item.detached()).is_some() {
                return Err(PersistenceError::duplicate_id(T::ENTITY, id));
            }
        }
        Ok(Self {
            items: RwLock::new(map),
        })
    }

    /// Insert or replace; last writer wins
    pub fn upsert(&self, item: &T) -> T {
        let stored = item.detached();
        self.items.write().insert(stored.key(), stored.clone());
        stored
    }

    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.items.read().get(id).cloned()
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().values().find(|item| pred(item)).cloned()
    }

    /// Matching items, oldest first
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let mut matches: Vec<T> = self
            .items
            .read()
            .values()
            .filter(|item| pred(item))
            .cloned()
            .collect();
        sort_stable(&mut matches);
        matches
    }

    /// One page ordered by creation time, ties broken by id
    pub fn page(&self, skip: usize, limit: usize) -> Vec<T> {
        self.filter(|_| true)
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect()
    }

    pub fn remove(&self, id: &T::Id) -> bool {
        self.items.write().remove(id).is_some()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Every stored aggregate as a JSON array, oldest first
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(&self.filter(|_| true))
            .map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let items: Vec<T> = serde_json::from_str(json)
            .map_err(|e| PersistenceError::Deserialization(e.to_string()))?;
        Self::from_items(items)
    }
}

fn sort_stable<T: Stored>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.created()
            .cmp(&b.created())
            .then_with(|| a.key().cmp(&b.key()))
    });
}
