//! Client aggregate events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{domain_event, domain_event_enum, DomainEvent, EventMetadata};

/// Emitted when a client is created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientCreated {
    pub metadata: EventMetadata,
    pub client_id: Uuid,
    pub name: String,
    pub email: String,
}

impl ClientCreated {
    pub fn new(client_id: Uuid, name: String, email: String, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            client_id,
            name,
            email,
        }
    }
}

/// Emitted after a partial update of a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientUpdated {
    pub metadata: EventMetadata,
    pub client_id: Uuid,
    pub name: String,
    pub email: String,
}

impl ClientUpdated {
    pub fn new(client_id: Uuid, name: String, email: String, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            client_id,
            name,
            email,
        }
    }
}

/// Emitted right before a client is removed from storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientDeleted {
    pub metadata: EventMetadata,
    pub client_id: Uuid,
}

impl ClientDeleted {
    pub fn new(client_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            client_id,
        }
    }
}

domain_event!(ClientCreated, client_id);
domain_event!(ClientUpdated, client_id);
domain_event!(ClientDeleted, client_id);

/// Any event raised by the client aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClientEvent {
    Created(ClientCreated),
    Updated(ClientUpdated),
    Deleted(ClientDeleted),
}

domain_event_enum!(ClientEvent {
    Created,
    Updated,
    Deleted
});
