//! Quote-related DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use memory_business_domain::errors::DomainResult;
use memory_business_domain::quote::{Quote, QuoteItem};
use memory_business_domain::value_objects::QuoteStatus;

/// One initial line of a new quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuoteItemCommand {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    /// Defaults to the quote currency
    #[serde(default)]
    pub currency: Option<String>,
}

/// Command to draft a new quote
///
/// Currency, tax rate and validity fall back to the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuoteCommand {
    pub client_id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<CreateQuoteItemCommand>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQuoteCommand {
    pub title: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub project_id: Option<String>,
}

/// New line priced in the quote's own currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddQuoteItemCommand {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: Decimal,
}

/// Target status; only `sent`, `accepted`, `rejected` and `expired` are reachable
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangeQuoteStatusCommand {
    pub status: QuoteStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItemDto {
    pub id: String,
    pub quote_id: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    pub total: Decimal,
    pub currency: String,
}

impl QuoteItemDto {
    pub fn from_domain(item: &QuoteItem) -> DomainResult<Self> {
        Ok(Self {
            id: item.id().to_string(),
            quote_id: item.quote_id().to_string(),
            description: item.description().to_string(),
            unit_price: item.unit_price().amount(),
            quantity: item.quantity(),
            total: item.total()?.amount(),
            currency: item.unit_price().currency().to_string(),
        })
    }
}

/// Quote DTO with its derived totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDto {
    pub id: String,
    pub client_id: String,
    pub project_id: Option<String>,
    pub title: String,
    pub status: QuoteStatus,
    pub currency: String,
    pub total_ht: Decimal,
    pub total_ttc: Decimal,
    pub tax_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub valid_until: NaiveDate,
    pub items: Vec<QuoteItemDto>,
}

impl QuoteDto {
    /// Fails when an item is priced in another currency than the quote
    pub fn from_domain(quote: &Quote) -> DomainResult<Self> {
        Ok(Self {
            id: quote.id().to_string(),
            client_id: quote.client_id().to_string(),
            project_id: quote.project_id().map(|id| id.to_string()),
            title: quote.title().to_string(),
            status: quote.status(),
            currency: quote.currency().to_string(),
            total_ht: quote.total_ht()?.amount(),
            total_ttc: quote.total_ttc()?.amount(),
            tax_rate: quote.tax_rate().rate(),
            created_at: quote.created_at(),
            updated_at: quote.updated_at(),
            valid_until: quote.valid_until(),
            items: quote
                .items()
                .iter()
                .map(QuoteItemDto::from_domain)
                .collect::<DomainResult<Vec<_>>>()?,
        })
    }
}
