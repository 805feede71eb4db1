//! Quote line

use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, DomainError, DomainResult};
use crate::value_objects::{Money, QuoteId, QuoteItemId};

/// Partial update of a quote line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItemUpdate {
    pub description: Option<String>,
    pub unit_price: Option<Money>,
    pub quantity: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuoteItemRecord")]
pub struct QuoteItem {
    id: QuoteItemId,
    quote_id: QuoteId,
    description: String,
    unit_price: Money,
    quantity: Decimal,
}

impl QuoteItem {
    pub fn create(
        quote_id: QuoteId,
        description: impl Into<String>,
        unit_price: Money,
        quantity: Decimal,
    ) -> DomainResult<Self> {
        Self::reconstitute(
            QuoteItemId::new(),
            quote_id,
            description.into(),
            unit_price,
            quantity,
        )
    }

    pub fn reconstitute(
        id: QuoteItemId,
        quote_id: QuoteId,
        description: String,
        unit_price: Money,
        quantity: Decimal,
    ) -> DomainResult<Self> {
        Self::validate(&description, quantity)?;
        Ok(Self {
            id,
            quote_id,
            description,
            unit_price,
            quantity,
        })
    }

    pub fn update(&mut self, changes: QuoteItemUpdate) -> DomainResult<()> {
        let description = changes
            .description
            .unwrap_or_else(|| self.description.clone());
        let quantity = changes.quantity.unwrap_or(self.quantity);
        Self::validate(&description, quantity)?;

        self.description = description;
        self.quantity = quantity;
        if let Some(unit_price) = changes.unit_price {
            self.unit_price = unit_price;
        }
        Ok(())
    }

    fn validate(description: &str, quantity: Decimal) -> DomainResult<()> {
        require_non_blank("description", description)?;
        if quantity <= Decimal::ZERO {
            return Err(DomainError::validation(
                "quantity",
                "Quantity must be greater than 0",
            ));
        }
        Ok(())
    }

    /// `unit_price * quantity`, in the unit price's currency
    pub fn total(&self) -> DomainResult<Money> {
        self.unit_price.multiply(self.quantity)
    }

    pub fn id(&self) -> QuoteItemId {
        self.id
    }

    pub fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price(&self) -> &Money {
        &self.unit_price
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }
}

impl PartialEq for QuoteItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for QuoteItem {}

impl Hash for QuoteItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct QuoteItemRecord {
    id: QuoteItemId,
    quote_id: QuoteId,
    description: String,
    unit_price: Money,
    quantity: Decimal,
}

impl TryFrom<QuoteItemRecord> for QuoteItem {
    type Error = DomainError;

    fn try_from(record: QuoteItemRecord) -> DomainResult<Self> {
        QuoteItem::reconstitute(
            record.id,
            record.quote_id,
            record.description,
            record.unit_price,
            record.quantity,
        )
    }
}
