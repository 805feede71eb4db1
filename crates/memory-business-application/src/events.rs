//! Domain event sink
//!
//! Aggregates only record events. Once a use case has persisted an aggregate
//! it drains the recorded events into an [`EventPublisher`]. The default
//! publisher drops them; wiring a real sink (queue, webhook, audit log) is an
//! infrastructure concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use memory_business_domain::events::DomainEvent;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>);
}

/// Publish every event in order
pub(crate) async fn publish_all<E, T>(publisher: &E, events: Vec<T>)
where
    E: EventPublisher + ?Sized,
    T: DomainEvent + 'static,
{
    for event in events {
        publisher.publish(Box::new(event)).await;
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: Box<dyn DomainEvent>) {}
}

/// What [`InMemoryEventPublisher`] keeps of each event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub event_id: Uuid,
    pub event_type: String,
    pub aggregate_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

/// In-memory event collector for testing
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<PublishedEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected events, oldest first
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: Box<dyn DomainEvent>) {
        self.events.lock().push(PublishedEvent {
            event_id: event.event_id(),
            event_type: event.event_type().to_string(),
            aggregate_id: event.aggregate_id(),
            occurred_at: event.occurred_at(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_business_domain::events::{ClientDeleted, ClientEvent};

    #[tokio::test]
    async fn test_in_memory_publisher() {
        let publisher = InMemoryEventPublisher::new();
        let client_id = Uuid::new_v4();

        publish_all(
            &publisher,
            vec![ClientEvent::Deleted(ClientDeleted::new(client_id, Utc::now()))],
        )
        .await;

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "ClientDeleted");
        assert_eq!(events[0].aggregate_id, client_id);

        publisher.clear();
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn test_noop_publisher_accepts_events() {
        NoOpEventPublisher
            .publish(Box::new(ClientDeleted::new(Uuid::new_v4(), Utc::now())))
            .await;
    }
}
