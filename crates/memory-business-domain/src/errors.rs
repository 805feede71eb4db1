//! Domain errors for Memory Business

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors
///
/// Every invariant failure is reported as-is; nothing in the domain retries
/// or silently corrects input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Ownership violation: {child} does not belong to {parent}")]
    OwnershipViolation { child: String, parent: String },

    #[error("Illegal transition: cannot {action} a quote in {from} state")]
    IllegalTransition { from: String, action: String },

    #[error("Estimation lookup failed: {reason}")]
    EstimationLookup { reason: String },

    #[error("Storage failure: {reason}")]
    StorageFailure { reason: String },
}

impl DomainError {
    /// Shorthand for a [`DomainError::ValidationError`]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`DomainError::EntityNotFound`]
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Reject empty or whitespace-only text
pub(crate) fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(
            field,
            format!("{} cannot be empty", field),
        ));
    }
    Ok(())
}

/// `a + b`, or a validation error on `field` when the result overflows
pub(crate) fn checked_add(field: &str, a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(field))
}

/// `a * b`, or a validation error on `field` when the result overflows
pub(crate) fn checked_mul(field: &str, a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(field))
}

/// Sum of `values` without panicking on overflow
pub(crate) fn checked_sum(
    field: &str,
    values: impl IntoIterator<Item = Decimal>,
) -> DomainResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| checked_add(field, acc, value))
}

fn overflow(field: &str) -> DomainError {
    DomainError::validation(field, format!("{} overflow", field))
}
