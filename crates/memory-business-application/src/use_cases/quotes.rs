//! Quote use cases

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use memory_business_domain::quote::{default_valid_until, Quote, QuoteItem, QuoteUpdate};
use memory_business_domain::repositories::QuoteRepository;
use memory_business_domain::value_objects::{
    ClientId, Money, ProjectId, QuoteId, QuoteStatus, TaxRate,
};

use crate::dto::{
    parse_id, AddQuoteItemCommand, ChangeQuoteStatusCommand, CreateQuoteCommand, QuoteDto,
    UpdateQuoteCommand,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{publish_all, EventPublisher, NoOpEventPublisher};
use crate::policy::{Pagination, QuoteDefaults};

async fn load_quote<R: QuoteRepository + ?Sized>(
    repository: &R,
    raw_id: &str,
) -> ApplicationResult<Quote> {
    let id = parse_id("quote_id", raw_id, QuoteId::from_string)?;
    repository.find_by_id(&id).await?.ok_or_else(|| {
        warn!(quote_id = %id, "Quote not found");
        ApplicationError::not_found("Quote", id)
    })
}

fn to_dtos(quotes: &[Quote]) -> ApplicationResult<Vec<QuoteDto>> {
    quotes
        .iter()
        .map(|q| QuoteDto::from_domain(q).map_err(ApplicationError::from))
        .collect()
}

/// Draft a quote with optional initial items
///
/// Omitted currency, tax rate and validity come from [`QuoteDefaults`].
/// Totals are computed before saving, so an item priced in another currency
/// is rejected and nothing is stored.
pub struct CreateQuote<R: ?Sized, E: ?Sized = NoOpEventPublisher> {
    repository: Arc<R>,
    events: Arc<E>,
    defaults: QuoteDefaults,
}

impl<R: QuoteRepository + ?Sized> CreateQuote<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_publisher(repository, Arc::new(NoOpEventPublisher))
    }
}

impl<R, E> CreateQuote<R, E>
where
    R: QuoteRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub fn with_publisher(repository: Arc<R>, events: Arc<E>) -> Self {
        Self {
            repository,
            events,
            defaults: QuoteDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: QuoteDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn execute(&self, cmd: CreateQuoteCommand) -> ApplicationResult<QuoteDto> {
        let client_id = parse_id("client_id", &cmd.client_id, ClientId::from_string)?;
        let project_id = cmd
            .project_id
            .as_deref()
            .map(|raw| parse_id("project_id", raw, ProjectId::from_string))
            .transpose()?;
        let currency = cmd
            .currency
            .unwrap_or_else(|| self.defaults.currency.clone());
        let tax_rate = match cmd.tax_rate {
            Some(rate) => TaxRate::new(rate)?,
            None => self.defaults.tax_rate,
        };
        let valid_until = match cmd.valid_until {
            Some(date) => date,
            None => default_valid_until(Utc::now(), self.defaults.validity_days)?,
        };

        let mut quote = Quote::create(
            client_id,
            cmd.title,
            currency,
            Some(tax_rate),
            Some(valid_until),
            project_id,
        )?;
        for item in cmd.items {
            let item_currency = item
                .currency
                .unwrap_or_else(|| quote.currency().to_string());
            let unit_price = Money::new(item.unit_price, item_currency)?;
            quote.add_item(QuoteItem::create(
                quote.id(),
                item.description,
                unit_price,
                item.quantity,
            )?)?;
        }
        quote.total_ttc()?;

        let saved = self.repository.save(&quote).await?;
        publish_all(self.events.as_ref(), quote.take_events()).await;

        info!(
            quote_id = %saved.id(),
            client_id = %client_id,
            items = saved.items().len(),
            "Quote created"
        );
        Ok(QuoteDto::from_domain(&saved)?)
    }
}

query_use_case!(GetQuote, QuoteRepository);

impl<R: QuoteRepository + ?Sized> GetQuote<R> {
    pub async fn execute(&self, quote_id: &str) -> ApplicationResult<QuoteDto> {
        let quote = load_quote(self.repository.as_ref(), quote_id).await?;
        Ok(QuoteDto::from_domain(&quote)?)
    }
}

pub struct ListQuotes<R: ?Sized> {
    repository: Arc<R>,
    pagination: Pagination,
}

impl<R: QuoteRepository + ?Sized> ListQuotes<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_pagination(repository, Pagination::default())
    }

    pub fn with_pagination(repository: Arc<R>, pagination: Pagination) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    pub async fn execute(
        &self,
        skip: usize,
        limit: Option<usize>,
    ) -> ApplicationResult<Vec<QuoteDto>> {
        let limit = self.pagination.resolve(limit);
        debug!(skip, limit, "Listing quotes");
        to_dtos(&self.repository.find_all(skip, limit).await?)
    }
}

query_use_case!(ListQuotesByClient, QuoteRepository);

impl<R: QuoteRepository + ?Sized> ListQuotesByClient<R> {
    pub async fn execute(&self, client_id: &str) -> ApplicationResult<Vec<QuoteDto>> {
        let client_id = parse_id("client_id", client_id, ClientId::from_string)?;
        to_dtos(&self.repository.find_by_client_id(&client_id).await?)
    }
}

query_use_case!(ListQuotesByProject, QuoteRepository);

impl<R: QuoteRepository + ?Sized> ListQuotesByProject<R> {
    pub async fn execute(&self, project_id: &str) -> ApplicationResult<Vec<QuoteDto>> {
        let project_id = parse_id("project_id", project_id, ProjectId::from_string)?;
        to_dtos(&self.repository.find_by_project_id(&project_id).await?)
    }
}

command_use_case!(UpdateQuote, QuoteRepository);

impl<R, E> UpdateQuote<R, E>
where
    R: QuoteRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        quote_id: &str,
        cmd: UpdateQuoteCommand,
    ) -> ApplicationResult<QuoteDto> {
        let mut quote = load_quote(self.repository.as_ref(), quote_id).await?;
        let project_id = cmd
            .project_id
            .as_deref()
            .map(|raw| parse_id("project_id", raw, ProjectId::from_string))
            .transpose()?;
        quote.update(QuoteUpdate {
            title: cmd.title,
            valid_until: cmd.valid_until,
            project_id,
        })?;

        let saved = self.repository.save(&quote).await?;
        publish_all(self.events.as_ref(), quote.take_events()).await;

        info!(quote_id = %saved.id(), "Quote updated");
        Ok(QuoteDto::from_domain(&saved)?)
    }
}

command_use_case!(DeleteQuote, QuoteRepository);

impl<R, E> DeleteQuote<R, E>
where
    R: QuoteRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(&self, quote_id: &str) -> ApplicationResult<bool> {
        let mut quote = load_quote(self.repository.as_ref(), quote_id).await?;
        quote.mark_as_deleted();

        let deleted = self.repository.delete(&quote.id()).await?;
        publish_all(self.events.as_ref(), quote.take_events()).await;

        info!(quote_id = %quote.id(), deleted, "Quote deleted");
        Ok(deleted)
    }
}

command_use_case!(
    /// Append a line priced in the quote's currency
    AddQuoteItem,
    QuoteRepository
);

impl<R, E> AddQuoteItem<R, E>
where
    R: QuoteRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        quote_id: &str,
        cmd: AddQuoteItemCommand,
    ) -> ApplicationResult<QuoteDto> {
        let mut quote = load_quote(self.repository.as_ref(), quote_id).await?;
        let unit_price = Money::new(cmd.unit_price, quote.currency())?;
        let item = QuoteItem::create(quote.id(), cmd.description, unit_price, cmd.quantity)?;
        let item_id = item.id();
        quote.add_item(item)?;
        quote.total_ttc()?;

        let saved = self.repository.save(&quote).await?;
        publish_all(self.events.as_ref(), quote.take_events()).await;

        info!(quote_id = %saved.id(), item_id = %item_id, "Quote item added");
        Ok(QuoteDto::from_domain(&saved)?)
    }
}

command_use_case!(
    /// Drive the quote lifecycle
    ///
    /// `draft` is never a valid target.
    ChangeQuoteStatus,
    QuoteRepository
);

impl<R, E> ChangeQuoteStatus<R, E>
where
    R: QuoteRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        quote_id: &str,
        cmd: ChangeQuoteStatusCommand,
    ) -> ApplicationResult<QuoteDto> {
        let mut quote = load_quote(self.repository.as_ref(), quote_id).await?;
        let from = quote.status();

        let transition = match cmd.status {
            QuoteStatus::Sent => quote.send(),
            QuoteStatus::Accepted => quote.accept(),
            QuoteStatus::Rejected => quote.reject(),
            QuoteStatus::Expired => {
                quote.mark_as_expired();
                Ok(())
            }
            QuoteStatus::Draft => Err(memory_business_domain::DomainError::IllegalTransition {
                from: from.to_string(),
                action: "reopen".to_string(),
            }),
        };
        if let Err(err) = transition {
            warn!(quote_id = %quote.id(), %from, to = %cmd.status, "Rejected status change");
            return Err(err.into());
        }

        let saved = self.repository.save(&quote).await?;
        publish_all(self.events.as_ref(), quote.take_events()).await;

        info!(quote_id = %saved.id(), %from, to = %saved.status(), "Quote status changed");
        Ok(QuoteDto::from_domain(&saved)?)
    }
}
