//! Application layer error types
//!
//! These errors are what the transport collaborator sees. Each domain
//! failure keeps its kind so it can be mapped to a protocol response.

use memory_business_domain::errors::DomainError;
use thiserror::Error;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    // === Validation Errors ===
    /// Input or invariant validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // === Not Found Errors ===
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    // === Conflict Errors ===
    /// Uniqueness violation, e.g. a duplicate client email
    #[error("Conflict: {0}")]
    Conflict(String),

    // === Business Rule Violations ===
    #[error("Ownership violation: {0}")]
    OwnershipViolation(String),

    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    /// Missing estimation rule or profile
    #[error("Estimation failed: {0}")]
    EstimationFailed(String),

    // === Infrastructure Errors ===
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl ApplicationError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError { field, reason } => {
                ApplicationError::ValidationFailed(format!("{}: {}", field, reason))
            }
            DomainError::EntityNotFound { entity_type, id } => {
                ApplicationError::NotFound { entity_type, id }
            }
            DomainError::Conflict { reason } => ApplicationError::Conflict(reason),
            DomainError::OwnershipViolation { child, parent } => {
                ApplicationError::OwnershipViolation(format!(
                    "{} does not belong to {}",
                    child, parent
                ))
            }
            err @ DomainError::IllegalTransition { .. } => {
                ApplicationError::IllegalTransition(err.to_string())
            }
            DomainError::EstimationLookup { reason } => ApplicationError::EstimationFailed(reason),
            DomainError::StorageFailure { reason } => ApplicationError::RepositoryError(reason),
        }
    }
}
