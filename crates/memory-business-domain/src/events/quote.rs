//! Quote aggregate events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{domain_event, domain_event_enum, DomainEvent, EventMetadata};
use crate::value_objects::QuoteStatus;

/// Emitted when a quote is drafted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteCreated {
    pub metadata: EventMetadata,
    pub quote_id: Uuid,
    pub client_id: Uuid,
    pub title: String,
}

impl QuoteCreated {
    pub fn new(quote_id: Uuid, client_id: Uuid, title: String, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            quote_id,
            client_id,
            title,
        }
    }
}

/// Emitted after the quote header (title, validity, project) changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteUpdated {
    pub metadata: EventMetadata,
    pub quote_id: Uuid,
    pub title: String,
    pub status: QuoteStatus,
}

impl QuoteUpdated {
    pub fn new(quote_id: Uuid, title: String, status: QuoteStatus, at: DateTime<Utc>) -> Self {
        Self {
            metadata: EventMetadata::at(at),
            quote_id,
            title,
            status,
        }
    }
}

/// Status transition events only carry the quote id
macro_rules! status_event {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
        pub struct $name {
            pub metadata: EventMetadata,
            pub quote_id: Uuid,
        }

        impl $name {
            pub fn new(quote_id: Uuid, at: DateTime<Utc>) -> Self {
                Self {
                    metadata: EventMetadata::at(at),
                    quote_id,
                }
            }
        }

        domain_event!($name, quote_id);
    };
}

status_event!(
    /// draft -> sent
    QuoteSent
);
status_event!(
    /// sent -> accepted
    QuoteAccepted
);
status_event!(
    /// sent -> rejected
    QuoteRejected
);
status_event!(
    /// any -> expired
    QuoteExpired
);
status_event!(
    /// Emitted right before a quote is removed from storage
    QuoteDeleted
);

domain_event!(QuoteCreated, quote_id);
domain_event!(QuoteUpdated, quote_id);

/// Any event raised by the quote aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum QuoteEvent {
    Created(QuoteCreated),
    Updated(QuoteUpdated),
    Sent(QuoteSent),
    Accepted(QuoteAccepted),
    Rejected(QuoteRejected),
    Expired(QuoteExpired),
    Deleted(QuoteDeleted),
}

domain_event_enum!(QuoteEvent {
    Created,
    Updated,
    Sent,
    Accepted,
    Rejected,
    Expired,
    Deleted,
});
