//! Data Transfer Objects (DTOs) for layer boundary crossing
//!
//! Commands carry identifiers as strings, the way they arrive from a
//! transport; use cases parse them into typed ids.

pub mod client;
pub mod project;
pub mod quote;

pub use client::*;
pub use project::*;
pub use quote::*;

use crate::errors::{ApplicationError, ApplicationResult};

/// Parse a string id, reporting the offending field on failure
pub(crate) fn parse_id<T>(
    field: &str,
    raw: &str,
    parse: fn(&str) -> Result<T, uuid::Error>,
) -> ApplicationResult<T> {
    parse(raw.trim())
        .map_err(|_| ApplicationError::ValidationFailed(format!("{}: invalid id '{}'", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_business_domain::value_objects::ClientId;

    #[test]
    fn test_parse_id() {
        let id = ClientId::new();
        assert_eq!(
            parse_id("client_id", &id.to_string(), ClientId::from_string).unwrap(),
            id
        );
        assert!(matches!(
            parse_id("client_id", "nope", ClientId::from_string),
            Err(ApplicationError::ValidationFailed(_))
        ));
    }
}
