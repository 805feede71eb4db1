//! Persistence Layer Error Types
//!
//! Error mapping to domain types

use memory_business_domain::errors::DomainError;
use thiserror::Error;

/// Errors that can occur while exporting or importing repository contents
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Two stored aggregates share an id
    #[error("Duplicate {entity_type} id {id}")]
    DuplicateId {
        entity_type: &'static str,
        id: String,
    },
}

impl PersistenceError {
    pub fn duplicate_id(entity_type: &'static str, id: impl ToString) -> Self {
        Self::DuplicateId {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        DomainError::StorageFailure {
            reason: err.to_string(),
        }
    }
}
