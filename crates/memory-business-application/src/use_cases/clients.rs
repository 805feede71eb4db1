//! Client use cases

use tracing::{debug, info, warn};

use memory_business_domain::client::Client;
use memory_business_domain::repositories::ClientRepository;
use memory_business_domain::value_objects::ClientId;

use crate::dto::{parse_id, ClientDto, CreateClientCommand, UpdateClientCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::{publish_all, EventPublisher};
use crate::policy::Pagination;

async fn load_client<R: ClientRepository + ?Sized>(
    repository: &R,
    raw_id: &str,
) -> ApplicationResult<Client> {
    let id = parse_id("client_id", raw_id, ClientId::from_string)?;
    repository.find_by_id(&id).await?.ok_or_else(|| {
        warn!(client_id = %id, "Client not found");
        ApplicationError::not_found("Client", id)
    })
}

fn duplicate_email(email: &str) -> ApplicationError {
    warn!(email, "Rejected duplicate client email");
    ApplicationError::Conflict(format!("Client with email {} already exists", email))
}

command_use_case!(
    /// Create a client; the email must not be used by another client
    CreateClient,
    ClientRepository
);

impl<R, E> CreateClient<R, E>
where
    R: ClientRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(&self, cmd: CreateClientCommand) -> ApplicationResult<ClientDto> {
        if self.repository.find_by_email(&cmd.email).await?.is_some() {
            return Err(duplicate_email(&cmd.email));
        }

        let address = cmd.address.into_domain()?;
        let mut client = Client::create(cmd.name, cmd.contact_name, cmd.email, cmd.phone, address)?;
        let saved = self.repository.save(&client).await?;
        publish_all(self.events.as_ref(), client.take_events()).await;

        info!(client_id = %saved.id(), "Client created");
        Ok(ClientDto::from_domain(&saved))
    }
}

query_use_case!(GetClient, ClientRepository);

impl<R: ClientRepository + ?Sized> GetClient<R> {
    pub async fn execute(&self, client_id: &str) -> ApplicationResult<ClientDto> {
        let client = load_client(self.repository.as_ref(), client_id).await?;
        Ok(ClientDto::from_domain(&client))
    }
}

/// Page through clients
pub struct ListClients<R: ?Sized> {
    repository: std::sync::Arc<R>,
    pagination: Pagination,
}

impl<R: ClientRepository + ?Sized> ListClients<R> {
    pub fn new(repository: std::sync::Arc<R>) -> Self {
        Self::with_pagination(repository, Pagination::default())
    }

    pub fn with_pagination(repository: std::sync::Arc<R>, pagination: Pagination) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    pub async fn execute(&self, skip: usize, limit: Option<usize>) -> ApplicationResult<Vec<ClientDto>> {
        let limit = self.pagination.resolve(limit);
        debug!(skip, limit, "Listing clients");
        let clients = self.repository.find_all(skip, limit).await?;
        Ok(clients.iter().map(ClientDto::from_domain).collect())
    }
}

command_use_case!(
    /// Partial update; email uniqueness is re-checked only when it changes
    UpdateClient,
    ClientRepository
);

impl<R, E> UpdateClient<R, E>
where
    R: ClientRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(
        &self,
        client_id: &str,
        cmd: UpdateClientCommand,
    ) -> ApplicationResult<ClientDto> {
        let mut client = load_client(self.repository.as_ref(), client_id).await?;

        if let Some(email) = cmd.email.as_deref() {
            if email != client.email() {
                if let Some(owner) = self.repository.find_by_email(email).await? {
                    if owner.id() != client.id() {
                        return Err(duplicate_email(email));
                    }
                }
            }
        }

        client.update(cmd.into_domain()?)?;
        let saved = self.repository.save(&client).await?;
        publish_all(self.events.as_ref(), client.take_events()).await;

        info!(client_id = %saved.id(), "Client updated");
        Ok(ClientDto::from_domain(&saved))
    }
}

command_use_case!(
    /// Remove a client; `ClientDeleted` is published after the removal
    DeleteClient,
    ClientRepository
);

impl<R, E> DeleteClient<R, E>
where
    R: ClientRepository + ?Sized,
    E: EventPublisher + ?Sized,
{
    pub async fn execute(&self, client_id: &str) -> ApplicationResult<bool> {
        let mut client = load_client(self.repository.as_ref(), client_id).await?;
        client.mark_as_deleted();

        let deleted = self.repository.delete(&client.id()).await?;
        publish_all(self.events.as_ref(), client.take_events()).await;

        info!(client_id = %client.id(), deleted, "Client deleted");
        Ok(deleted)
    }
}
