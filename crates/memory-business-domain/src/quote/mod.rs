//! Quote aggregate root
//!
//! ```text
//!   draft ──send──▶ sent ──accept──▶ accepted
//!                     └───reject──▶ rejected
//!   (any) ──mark_as_expired──▶ expired
//! ```
//!
//! Totals are derived from the current items on every call and never stored.

mod quote_item;

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use quote_item::{QuoteItem, QuoteItemUpdate};

use crate::errors::{require_non_blank, DomainError, DomainResult};
use crate::events::{
    EventLog, QuoteAccepted, QuoteCreated, QuoteDeleted, QuoteEvent, QuoteExpired,
    QuoteRejected, QuoteSent, QuoteUpdated,
};
use crate::value_objects::{
    ClientId, Money, ProjectId, QuoteId, QuoteItemId, QuoteStatus, TaxRate,
};

/// Validity applied when a quote is created without an explicit date
pub const DEFAULT_VALIDITY_DAYS: u64 = 30;

/// Partial update of the quote header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub title: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub project_id: Option<ProjectId>,
}

/// Quote aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuoteRecord")]
pub struct Quote {
    id: QuoteId,
    client_id: ClientId,
    project_id: Option<ProjectId>,
    title: String,
    status: QuoteStatus,
    currency: String,
    tax_rate: TaxRate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    valid_until: NaiveDate,
    items: Vec<QuoteItem>,
    #[serde(skip)]
    events: EventLog<QuoteEvent>,
}

impl Quote {
    /// Draft a new quote and record `QuoteCreated`
    ///
    /// Without a tax rate the quote uses 20%; without a validity date it is
    /// valid for [`DEFAULT_VALIDITY_DAYS`] from today.
    pub fn create(
        client_id: ClientId,
        title: impl Into<String>,
        currency: impl Into<String>,
        tax_rate: Option<TaxRate>,
        valid_until: Option<NaiveDate>,
        project_id: Option<ProjectId>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let valid_until = match valid_until {
            Some(date) => date,
            None => default_valid_until(now, DEFAULT_VALIDITY_DAYS)?,
        };
        let mut quote = Self::reconstitute(
            QuoteId::new(),
            client_id,
            project_id,
            title.into(),
            QuoteStatus::Draft,
            currency.into(),
            tax_rate.unwrap_or_default(),
            now,
            now,
            valid_until,
            Vec::new(),
        )?;

        quote.events.record(QuoteEvent::Created(QuoteCreated::new(
            quote.id.as_uuid(),
            client_id.as_uuid(),
            quote.title.clone(),
            now,
        )));
        Ok(quote)
    }

    /// Rebuild a stored quote. Validates, records no event.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: QuoteId,
        client_id: ClientId,
        project_id: Option<ProjectId>,
        title: String,
        status: QuoteStatus,
        currency: String,
        tax_rate: TaxRate,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        valid_until: NaiveDate,
        items: Vec<QuoteItem>,
    ) -> DomainResult<Self> {
        if currency.chars().count() != 3 {
            return Err(DomainError::validation(
                "currency",
                "Currency must be a 3-letter code",
            ));
        }
        Self::validate(&title, valid_until, created_at)?;

        let mut quote = Self {
            id,
            client_id,
            project_id,
            title,
            status,
            currency,
            tax_rate,
            created_at,
            updated_at,
            valid_until,
            items: Vec::with_capacity(items.len()),
            events: EventLog::default(),
        };
        for item in items {
            quote.check_owns(&item)?;
            quote.items.push(item);
        }
        Ok(quote)
    }

    /// Apply the provided header fields and record `QuoteUpdated`
    pub fn update(&mut self, changes: QuoteUpdate) -> DomainResult<()> {
        let title = changes.title.unwrap_or_else(|| self.title.clone());
        let valid_until = changes.valid_until.unwrap_or(self.valid_until);
        Self::validate(&title, valid_until, self.created_at)?;

        self.title = title;
        self.valid_until = valid_until;
        if changes.project_id.is_some() {
            self.project_id = changes.project_id;
        }
        self.touch();

        self.events.record(QuoteEvent::Updated(QuoteUpdated::new(
            self.id.as_uuid(),
            self.title.clone(),
            self.status,
            self.updated_at,
        )));
        Ok(())
    }

    fn validate(title: &str, valid_until: NaiveDate, created_at: DateTime<Utc>) -> DomainResult<()> {
        require_non_blank("title", title)?;
        if valid_until < created_at.date_naive() {
            return Err(DomainError::validation(
                "valid_until",
                "Valid until date cannot be before creation date",
            ));
        }
        Ok(())
    }

    // === Status transitions ===

    /// draft -> sent
    pub fn send(&mut self) -> DomainResult<()> {
        self.require_status(QuoteStatus::Draft, "send")?;
        self.status = QuoteStatus::Sent;
        self.touch();
        self.events
            .record(QuoteEvent::Sent(QuoteSent::new(self.id.as_uuid(), self.updated_at)));
        Ok(())
    }

    /// sent -> accepted
    pub fn accept(&mut self) -> DomainResult<()> {
        self.require_status(QuoteStatus::Sent, "accept")?;
        self.status = QuoteStatus::Accepted;
        self.touch();
        self.events.record(QuoteEvent::Accepted(QuoteAccepted::new(
            self.id.as_uuid(),
            self.updated_at,
        )));
        Ok(())
    }

    /// sent -> rejected
    pub fn reject(&mut self) -> DomainResult<()> {
        self.require_status(QuoteStatus::Sent, "reject")?;
        self.status = QuoteStatus::Rejected;
        self.touch();
        self.events.record(QuoteEvent::Rejected(QuoteRejected::new(
            self.id.as_uuid(),
            self.updated_at,
        )));
        Ok(())
    }

    /// Allowed from any state
    pub fn mark_as_expired(&mut self) {
        self.status = QuoteStatus::Expired;
        self.touch();
        self.events.record(QuoteEvent::Expired(QuoteExpired::new(
            self.id.as_uuid(),
            self.updated_at,
        )));
    }

    /// Record `QuoteDeleted`; removal itself is the repository's job
    pub fn mark_as_deleted(&mut self) {
        self.events.record(QuoteEvent::Deleted(QuoteDeleted::new(
            self.id.as_uuid(),
            Utc::now(),
        )));
    }

    fn require_status(&self, expected: QuoteStatus, action: &str) -> DomainResult<()> {
        if self.status != expected {
            return Err(DomainError::IllegalTransition {
                from: self.status.to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // === Items ===

    /// # Errors
    /// `OwnershipViolation` if the item was created for another quote.
    pub fn add_item(&mut self, item: QuoteItem) -> DomainResult<()> {
        self.check_owns(&item)?;
        self.items.push(item);
        self.touch();
        Ok(())
    }

    /// Returns `true` if an item was removed
    pub fn remove_item(&mut self, item_id: QuoteItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != item_id);
        self.touch();
        self.items.len() != before
    }

    pub fn update_item(&mut self, item_id: QuoteItemId, changes: QuoteItemUpdate) -> DomainResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == item_id)
            .ok_or_else(|| DomainError::not_found("QuoteItem", item_id))?;
        item.update(changes)?;
        self.touch();
        Ok(())
    }

    fn check_owns(&self, item: &QuoteItem) -> DomainResult<()> {
        if item.quote_id() != self.id {
            return Err(DomainError::OwnershipViolation {
                child: format!("QuoteItem {}", item.id()),
                parent: format!("Quote {}", self.id),
            });
        }
        Ok(())
    }

    // === Totals ===

    /// Sum of item totals in the quote currency
    ///
    /// # Errors
    /// `ValidationError` if an item is priced in another currency or the sum
    /// overflows.
    pub fn total_ht(&self) -> DomainResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency.clone())?, |acc, item| {
                acc.add(&item.total()?)
            })
    }

    /// `total_ht * (1 + tax_rate)`
    pub fn total_ttc(&self) -> DomainResult<Money> {
        let ht = self.total_ht()?;
        Money::new(
            self.tax_rate.calculate_total_with_tax(ht.amount())?,
            self.currency.clone(),
        )
    }

    // === Events ===

    pub fn pending_events(&self) -> &[QuoteEvent] {
        self.events.pending()
    }

    pub fn take_events(&mut self) -> Vec<QuoteEvent> {
        self.events.drain()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // === Getters ===

    pub fn id(&self) -> QuoteId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn valid_until(&self) -> NaiveDate {
        self.valid_until
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }
}

/// `now`'s calendar date plus `days`
pub fn default_valid_until(now: DateTime<Utc>, days: u64) -> DomainResult<NaiveDate> {
    now.date_naive()
        .checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::validation("valid_until", "Validity date out of range"))
}

impl PartialEq for Quote {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Quote {}

impl Hash for Quote {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.status)
    }
}

/// Stored shape of a quote, rebuilt through [`Quote::reconstitute`]
#[derive(Deserialize)]
struct QuoteRecord {
    id: QuoteId,
    client_id: ClientId,
    project_id: Option<ProjectId>,
    title: String,
    status: QuoteStatus,
    currency: String,
    tax_rate: TaxRate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    valid_until: NaiveDate,
    items: Vec<QuoteItem>,
}

impl TryFrom<QuoteRecord> for Quote {
    type Error = DomainError;

    fn try_from(record: QuoteRecord) -> DomainResult<Self> {
        Quote::reconstitute(
            record.id,
            record.client_id,
            record.project_id,
            record.title,
            record.status,
            record.currency,
            record.tax_rate,
            record.created_at,
            record.updated_at,
            record.valid_until,
            record.items,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DomainEvent;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn draft() -> Quote {
        Quote::create(ClientId::new(), "Website", "EUR", None, None, None).unwrap()
    }

    fn item(quote: &Quote, price: Decimal, qty: Decimal) -> QuoteItem {
        QuoteItem::create(quote.id(), "Work", Money::new(price, "EUR").unwrap(), qty).unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let quote = draft();
        assert_eq!(quote.status(), QuoteStatus::Draft);
        assert_eq!(quote.tax_rate().rate(), dec!(0.20));
        assert_eq!(
            quote.valid_until(),
            quote.created_at().date_naive() + chrono::Duration::days(30)
        );
        assert_eq!(quote.pending_events()[0].event_type(), "QuoteCreated");
    }

    #[test]
    fn test_create_validation() {
        assert!(Quote::create(ClientId::new(), " ", "EUR", None, None, None).is_err());
        assert!(Quote::create(ClientId::new(), "T", "EURO", None, None, None).is_err());
        let yesterday = Utc::now().date_naive() - chrono::Duration::days(1);
        assert!(Quote::create(ClientId::new(), "T", "EUR", None, Some(yesterday), None).is_err());
    }

    #[test]
    fn test_send_then_accept() {
        let mut quote = draft();
        quote.send().unwrap();
        assert_eq!(quote.status(), QuoteStatus::Sent);
        quote.accept().unwrap();
        assert_eq!(quote.status(), QuoteStatus::Accepted);

        let types: Vec<_> = quote
            .pending_events()
            .iter()
            .map(|e| e.event_type().to_string())
            .collect();
        assert_eq!(types, ["QuoteCreated", "QuoteSent", "QuoteAccepted"]);
    }

    #[test]
    fn test_accept_draft_is_illegal() {
        let mut quote = draft();
        let err = quote.accept().unwrap_err();
        assert_eq!(
            err,
            DomainError::IllegalTransition {
                from: "draft".into(),
                action: "accept".into(),
            }
        );
        assert_eq!(quote.status(), QuoteStatus::Draft);
    }

    #[test]
    fn test_reject_requires_sent() {
        let mut quote = draft();
        assert!(quote.reject().is_err());
        quote.send().unwrap();
        assert!(quote.send().is_err());
        quote.reject().unwrap();
        assert_eq!(quote.status(), QuoteStatus::Rejected);
        assert!(quote.accept().is_err());
    }

    #[test]
    fn test_expire_from_any_state() {
        let mut quote = draft();
        quote.send().unwrap();
        quote.accept().unwrap();
        quote.mark_as_expired();
        assert_eq!(quote.status(), QuoteStatus::Expired);
    }

    #[test]
    fn test_totals_follow_items() {
        let mut quote = draft();
        assert_eq!(quote.total_ht().unwrap(), Money::zero("EUR").unwrap());

        let first = item(&quote, dec!(150), dec!(3));
        quote.add_item(first).unwrap();
        let ht = quote.total_ht().unwrap();
        let ttc = quote.total_ttc().unwrap();
        assert_eq!(ht.amount(), dec!(450));
        assert_eq!(ttc.amount(), dec!(540));

        let second = item(&quote, dec!(100), dec!(2));
        let second_id = second.id();
        quote.add_item(second).unwrap();
        assert_eq!(quote.total_ht().unwrap().amount(), ht.amount() + dec!(200));
        assert_eq!(
            quote.total_ttc().unwrap().amount(),
            ttc.amount() + dec!(200) * dec!(1.20)
        );

        assert!(quote.remove_item(second_id));
        assert_eq!(quote.total_ht().unwrap(), ht);
    }

    #[test]
    fn test_add_foreign_item_fails() {
        let mut quote = draft();
        let other = draft();
        let stray = item(&other, dec!(1), dec!(1));
        assert!(matches!(
            quote.add_item(stray),
            Err(DomainError::OwnershipViolation { .. })
        ));
    }

    #[test]
    fn test_mixed_currency_total_fails() {
        let mut quote = draft();
        let usd = QuoteItem::create(quote.id(), "Hosting", Money::new(dec!(10), "USD").unwrap(), dec!(1))
            .unwrap();
        quote.add_item(usd).unwrap();
        assert!(matches!(
            quote.total_ht(),
            Err(DomainError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_update_header() {
        let mut quote = draft();
        quote.clear_events();
        let project_id = ProjectId::new();

        quote
            .update(QuoteUpdate {
                title: Some("Website v2".into()),
                project_id: Some(project_id),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(quote.title(), "Website v2");
        assert_eq!(quote.project_id(), Some(project_id));
        assert_eq!(quote.pending_events()[0].event_type(), "QuoteUpdated");

        let past = quote.created_at().date_naive() - chrono::Duration::days(1);
        assert!(quote
            .update(QuoteUpdate {
                valid_until: Some(past),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn test_update_item_in_place() {
        let mut quote = draft();
        let line = item(&quote, dec!(100), dec!(1));
        let id = line.id();
        quote.add_item(line).unwrap();

        quote
            .update_item(
                id,
                QuoteItemUpdate {
                    quantity: Some(dec!(4)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(quote.total_ht().unwrap().amount(), dec!(400));
        assert!(quote
            .update_item(QuoteItemId::new(), QuoteItemUpdate::default())
            .is_err());
    }
}
