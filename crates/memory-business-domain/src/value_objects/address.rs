use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, DomainError, DomainResult};

/// Postal address of a client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressRecord")]
pub struct Address {
    street: String,
    city: String,
    zip_code: String,
    country: String,
}

impl Address {
    /// All four parts must be non-blank
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> DomainResult<Self> {
        let address = Self {
            street: street.into(),
            city: city.into(),
            zip_code: zip_code.into(),
            country: country.into(),
        };
        require_non_blank("street", &address.street)?;
        require_non_blank("city", &address.city)?;
        require_non_blank("zip_code", &address.zip_code)?;
        require_non_blank("country", &address.country)?;
        Ok(address)
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {}, {}",
            self.street, self.zip_code, self.city, self.country
        )
    }
}

#[derive(Deserialize)]
struct AddressRecord {
    street: String,
    city: String,
    zip_code: String,
    country: String,
}

impl TryFrom<AddressRecord> for Address {
    type Error = DomainError;

    fn try_from(record: AddressRecord) -> DomainResult<Self> {
        Address::new(record.street, record.city, record.zip_code, record.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_valid_address() {
        let address = Address::new("123 Main St", "Paris", "75001", "France").unwrap();
        assert_eq!(address.city(), "Paris");
        assert_eq!(address.to_string(), "123 Main St, 75001 Paris, France");
    }

    #[test]
    fn test_blank_part_rejected() {
        let err = Address::new("123 Main St", "   ", "75001", "France").unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationError { ref field, .. } if field == "city"
        ));
    }

    #[test]
    fn test_value_equality() {
        let a = Address::new("1 Rue", "Lyon", "69001", "France").unwrap();
        let b = Address::new("1 Rue", "Lyon", "69001", "France").unwrap();
        assert_eq!(a, b);
    }
}
