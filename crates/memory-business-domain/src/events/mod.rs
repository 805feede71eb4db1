//! Domain events
//!
//! Aggregates record events into their own [`EventLog`] as they mutate. The
//! log is drained by the application layer once the aggregate has been
//! persisted; until then the events belong to the aggregate instance.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record of something that happened to an aggregate
pub trait DomainEvent: fmt::Debug + Send + Sync {
    /// Unique id of this event occurrence
    fn event_id(&self) -> Uuid;

    /// Id of the aggregate that raised the event
    fn aggregate_id(&self) -> Uuid;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Stable event name, e.g. `"QuoteSent"`
    fn event_type(&self) -> &str;
}

/// Common event fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Metadata stamped with the mutation's own timestamp
    pub fn at(occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at,
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending events of one aggregate instance
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog<E> {
    pending: Vec<E>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E: DomainEvent> EventLog<E> {
    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    /// Remove and return every pending event, oldest first
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Implement [`DomainEvent`] for a struct carrying `metadata` and an
/// aggregate id field.
macro_rules! domain_event {
    ($name:ident, $aggregate:ident) => {
        impl $crate::events::DomainEvent for $name {
            fn event_id(&self) -> ::uuid::Uuid {
                self.metadata.event_id
            }

            fn aggregate_id(&self) -> ::uuid::Uuid {
                self.$aggregate
            }

            fn occurred_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.metadata.occurred_at
            }

            fn event_type(&self) -> &str {
                stringify!($name)
            }
        }
    };
}

/// Implement [`DomainEvent`] for a per-aggregate enum whose variants each
/// wrap one event struct.
macro_rules! domain_event_enum {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::events::DomainEvent for $name {
            fn event_id(&self) -> ::uuid::Uuid {
                match self {
                    $($name::$variant(e) => e.event_id(),)+
                }
            }

            fn aggregate_id(&self) -> ::uuid::Uuid {
                match self {
                    $($name::$variant(e) => e.aggregate_id(),)+
                }
            }

            fn occurred_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                match self {
                    $($name::$variant(e) => e.occurred_at(),)+
                }
            }

            fn event_type(&self) -> &str {
                match self {
                    $($name::$variant(e) => e.event_type(),)+
                }
            }
        }
    };
}

pub(crate) use domain_event;
pub(crate) use domain_event_enum;

pub mod client;
pub mod project;
pub mod quote;

pub use client::*;
pub use project::*;
pub use quote::*;
