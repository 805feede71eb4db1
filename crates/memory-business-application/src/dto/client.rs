//! Client-related DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use memory_business_domain::client::{Client, ClientUpdate};
use memory_business_domain::errors::DomainResult;
use memory_business_domain::value_objects::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDto {
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

impl AddressDto {
    pub fn into_domain(self) -> DomainResult<Address> {
        Address::new(self.street, self.city, self.zip_code, self.country)
    }

    pub fn from_domain(address: &Address) -> Self {
        Self {
            street: address.street().to_string(),
            city: address.city().to_string(),
            zip_code: address.zip_code().to_string(),
            country: address.country().to_string(),
        }
    }
}

/// Command to create a new client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientCommand {
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: AddressDto,
}

/// Partial client update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClientCommand {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressDto>,
}

impl UpdateClientCommand {
    pub(crate) fn into_domain(self) -> DomainResult<ClientUpdate> {
        Ok(ClientUpdate {
            name: self.name,
            contact_name: self.contact_name,
            email: self.email,
            phone: self.phone,
            address: self.address.map(AddressDto::into_domain).transpose()?,
        })
    }
}

/// Client DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: String,
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: AddressDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientDto {
    pub fn from_domain(client: &Client) -> Self {
        Self {
            id: client.id().to_string(),
            name: client.name().to_string(),
            contact_name: client.contact_name().to_string(),
            email: client.email().to_string(),
            phone: client.phone().to_string(),
            address: AddressDto::from_domain(client.address()),
            created_at: client.created_at(),
            updated_at: client.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_command_defaults_from_json() {
        let cmd: UpdateClientCommand = serde_json::from_str(r#"{"phone": "+44"}"#).unwrap();
        assert_eq!(cmd.phone.as_deref(), Some("+44"));
        assert!(cmd.email.is_none());

        let update = cmd.into_domain().unwrap();
        assert!(update.address.is_none());
    }

    #[test]
    fn test_blank_address_rejected() {
        let dto = AddressDto {
            street: "".into(),
            city: "Paris".into(),
            zip_code: "75001".into(),
            country: "France".into(),
        };
        assert!(dto.into_domain().is_err());
    }
}
