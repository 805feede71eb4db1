//! Client aggregate root
//!
//! A client is the billing counterparty of projects and quotes. Email
//! uniqueness is a cross-aggregate rule and is therefore checked by the
//! application layer through the repository, not here.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, DomainError, DomainResult};
use crate::events::{ClientCreated, ClientDeleted, ClientEvent, ClientUpdated, EventLog};
use crate::value_objects::{Address, ClientId};

/// Partial update of a client; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

/// Client aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ClientRecord")]
pub struct Client {
    id: ClientId,
    name: String,
    contact_name: String,
    email: String,
    phone: String,
    address: Address,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: EventLog<ClientEvent>,
}

impl Client {
    /// Create a new client and record `ClientCreated`
    ///
    /// # Errors
    /// `ValidationError` when a text field is blank or the email has no `@`.
    pub fn create(
        name: impl Into<String>,
        contact_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: Address,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let mut client = Self::reconstitute(
            ClientId::new(),
            name.into(),
            contact_name.into(),
            email.into(),
            phone.into(),
            address,
            now,
            now,
        )?;

        client.events.record(ClientEvent::Created(ClientCreated::new(
            client.id.as_uuid(),
            client.name.clone(),
            client.email.clone(),
            now,
        )));
        Ok(client)
    }

    /// Rebuild a stored client. Validates, records no event.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClientId,
        name: String,
        contact_name: String,
        email: String,
        phone: String,
        address: Address,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::validate(&name, &contact_name, &email, &phone)?;
        Ok(Self {
            id,
            name,
            contact_name,
            email,
            phone,
            address,
            created_at,
            updated_at,
            events: EventLog::default(),
        })
    }

    /// Apply the provided fields and record `ClientUpdated`
    ///
    /// The client is left untouched when the merged values are invalid.
    pub fn update(&mut self, changes: ClientUpdate) -> DomainResult<()> {
        let name = changes.name.unwrap_or_else(|| self.name.clone());
        let contact_name = changes
            .contact_name
            .unwrap_or_else(|| self.contact_name.clone());
        let email = changes.email.unwrap_or_else(|| self.email.clone());
        let phone = changes.phone.unwrap_or_else(|| self.phone.clone());
        Self::validate(&name, &contact_name, &email, &phone)?;

        self.name = name;
        self.contact_name = contact_name;
        self.email = email;
        self.phone = phone;
        if let Some(address) = changes.address {
            self.address = address;
        }
        self.updated_at = Utc::now();

        self.events.record(ClientEvent::Updated(ClientUpdated::new(
            self.id.as_uuid(),
            self.name.clone(),
            self.email.clone(),
            self.updated_at,
        )));
        Ok(())
    }

    /// Record `ClientDeleted`; removal itself is the repository's job
    pub fn mark_as_deleted(&mut self) {
        self.events.record(ClientEvent::Deleted(ClientDeleted::new(
            self.id.as_uuid(),
            Utc::now(),
        )));
    }

    fn validate(name: &str, contact_name: &str, email: &str, phone: &str) -> DomainResult<()> {
        require_non_blank("name", name)?;
        require_non_blank("contact_name", contact_name)?;
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email", "Invalid email address"));
        }
        require_non_blank("phone", phone)?;
        Ok(())
    }

    // === Events ===

    pub fn pending_events(&self) -> &[ClientEvent] {
        self.events.pending()
    }

    /// Remove and return the pending events
    pub fn take_events(&mut self) -> Vec<ClientEvent> {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // === Getters ===

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Client {}

impl Hash for Client {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Stored shape of a client, rebuilt through [`Client::reconstitute`]
#[derive(Deserialize)]
struct ClientRecord {
    id: ClientId,
    name: String,
    contact_name: String,
    email: String,
    phone: String,
    address: Address,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRecord> for Client {
    type Error = DomainError;

    fn try_from(record: ClientRecord) -> DomainResult<Self> {
        Client::reconstitute(
            record.id,
            record.name,
            record.contact_name,
            record.email,
            record.phone,
            record.address,
            record.created_at,
            record.updated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DomainEvent;
    use std::collections::HashSet;

    fn address() -> Address {
        Address::new("1 rue de la Paix", "Paris", "75002", "France").unwrap()
    }

    fn acme() -> Client {
        Client::create("Acme", "John", "john@acme.com", "+33100000000", address()).unwrap()
    }

    #[test]
    fn test_create_records_event() {
        let client = acme();
        assert_eq!(client.name(), "Acme");
        assert_eq!(client.created_at(), client.updated_at());
        assert_eq!(client.pending_events().len(), 1);
        assert_eq!(client.pending_events()[0].event_type(), "ClientCreated");
        assert_eq!(
            client.pending_events()[0].aggregate_id(),
            client.id().as_uuid()
        );
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        assert!(Client::create("", "John", "a@b.c", "1", address()).is_err());
        assert!(Client::create("Acme", " ", "a@b.c", "1", address()).is_err());
        assert!(Client::create("Acme", "John", "no-at-sign", "1", address()).is_err());
        assert!(Client::create("Acme", "John", "a@b.c", "", address()).is_err());
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut client = acme();
        client.clear_events();

        client
            .update(ClientUpdate {
                phone: Some("+33200000000".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(client.phone(), "+33200000000");
        assert_eq!(client.email(), "john@acme.com");
        assert_eq!(client.contact_name(), "John");
        assert!(client.updated_at() >= client.created_at());
        assert_eq!(client.pending_events()[0].event_type(), "ClientUpdated");
    }

    #[test]
    fn test_invalid_update_leaves_client_unchanged() {
        let mut client = acme();
        client.clear_events();

        let result = client.update(ClientUpdate {
            name: Some("Renamed".into()),
            email: Some("broken".into()),
            ..Default::default()
        });

        assert!(matches!(result, Err(DomainError::ValidationError { .. })));
        assert_eq!(client.name(), "Acme");
        assert!(client.pending_events().is_empty());
    }

    #[test]
    fn test_mark_as_deleted_records_event() {
        let mut client = acme();
        client.clear_events();
        client.mark_as_deleted();

        let events = client.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "ClientDeleted");
        assert!(client.pending_events().is_empty());
    }

    #[test]
    fn test_identity_equality() {
        let client = acme();
        let mut renamed = client.clone();
        renamed
            .update(ClientUpdate {
                name: Some("Acme Corp".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(client, renamed);
        assert_ne!(client, acme());

        let mut set = HashSet::new();
        set.insert(client);
        set.insert(renamed);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serialization_skips_events() {
        let client = acme();
        let json = serde_json::to_string(&client).unwrap();
        assert!(!json.contains("events"));

        let restored: Client = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.email(), client.email());
        assert!(restored.pending_events().is_empty());
    }
}
