//! Project aggregate events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{domain_event, domain_event_enum, DomainEvent, EventMetadata};
use crate::value_objects::ProjectStatus;

/// Emitted when a project is created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectCreated {
    pub metadata: EventMetadata,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
}

impl ProjectCreated {
    pub fn new(
        project_id: Uuid,
        client_id: Uuid,
        name: String,
        status: ProjectStatus,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            project_id,
            client_id,
            name,
            status,
        }
    }
}

/// Emitted after a partial update of a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectUpdated {
    pub metadata: EventMetadata,
    pub project_id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
}

impl ProjectUpdated {
    pub fn new(project_id: Uuid, name: String, status: ProjectStatus, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            project_id,
            name,
            status,
        }
    }
}

/// Emitted when a project is forced to `completed`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectCompleted {
    pub metadata: EventMetadata,
    pub project_id: Uuid,
}

impl ProjectCompleted {
    pub fn new(project_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            project_id,
        }
    }
}

/// Emitted right before a project is removed from storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDeleted {
    pub metadata: EventMetadata,
    pub project_id: Uuid,
}

impl ProjectDeleted {
    pub fn new(project_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            project_id,
        }
    }
}

domain_event!(ProjectCreated, project_id);
domain_event!(ProjectUpdated, project_id);
domain_event!(ProjectCompleted, project_id);
domain_event!(ProjectDeleted, project_id);

/// Any event raised by the project aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ProjectEvent {
    Created(ProjectCreated),
    Updated(ProjectUpdated),
    Completed(ProjectCompleted),
    Deleted(ProjectDeleted),
}

domain_event_enum!(ProjectEvent {
    Created,
    Updated,
    Completed,
    Deleted
});
