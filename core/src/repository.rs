//! Async repository over a remote resource collection.
//!
//! # Design
//! Each operation is one round trip: build the request with
//! `ResourceClient`, hand it to the `Transport`, resolve the response. The
//! repository holds no mutable state, so one instance can serve any number
//! of concurrent callers. Nothing is retried and nothing is cached.
//!
//! # Cancellation
//! Every operation takes a `CancellationToken`. When it fires, the in-flight
//! transport future is dropped, which aborts the request, and the operation
//! returns `RepositoryError::Cancelled`. A token that is already cancelled
//! never sends anything. Once sent, a request may still have been applied by
//! the server, so a cancelled create or edit is at-most-once, not
//! exactly-once. Re-read before retrying.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::error::RepositoryError;
use crate::http::{HttpRequest, HttpResponse};
use crate::resource::{People, Resource};
use crate::transport::Transport;
use crate::types::{EditPersonParameters, Person, QueryPersonParameters};

/// The people store as seen by application code.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn create_person(
        &self,
        parameters: &EditPersonParameters,
        cancel: &CancellationToken,
    ) -> Result<Person, RepositoryError>;

    async fn get_person(&self, id: Uuid, cancel: &CancellationToken)
        -> Result<Person, RepositoryError>;

    async fn get_people(
        &self,
        parameters: &QueryPersonParameters,
        cancel: &CancellationToken,
    ) -> Result<Vec<Person>, RepositoryError>;

    /// Partial update: only fields assigned in `parameters` are sent.
    async fn edit_person(
        &self,
        id: Uuid,
        parameters: &EditPersonParameters,
        cancel: &CancellationToken,
    ) -> Result<Person, RepositoryError>;

    async fn delete_person(&self, id: Uuid, cancel: &CancellationToken)
        -> Result<(), RepositoryError>;
}

/// Repository for the `R` collection over transport `T`.
#[derive(Debug, Clone)]
pub struct HttpRepository<R, T> {
    client: ResourceClient<R>,
    transport: T,
}

impl<R: Resource, T: Transport> HttpRepository<R, T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: ResourceClient::new(base_url),
            transport,
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(config.base_url().as_str(), transport)
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    #[instrument(skip_all, fields(collection = R::COLLECTION))]
    pub async fn create(
        &self,
        input: &R::Edit,
        cancel: &CancellationToken,
    ) -> Result<R::Entity, RepositoryError> {
        let request = self.client.build_create(input)?;
        let response = self.execute(request, cancel).await?;
        self.client.parse_create(response).inspect_err(log_failure)
    }

    #[instrument(skip_all, fields(collection = R::COLLECTION, id = %id))]
    pub async fn get(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<R::Entity, RepositoryError> {
        let request = self.client.build_get(id);
        let response = self.execute(request, cancel).await?;
        self.client.parse_get(response).inspect_err(log_failure)
    }

    #[instrument(skip_all, fields(collection = R::COLLECTION))]
    pub async fn query(
        &self,
        filters: &R::Query,
        cancel: &CancellationToken,
    ) -> Result<Vec<R::Entity>, RepositoryError> {
        let request = self.client.build_query(filters);
        let response = self.execute(request, cancel).await?;
        let entities = self.client.parse_query(response).inspect_err(log_failure)?;
        debug!(count = entities.len(), "decoded collection");
        Ok(entities)
    }

    #[instrument(skip_all, fields(collection = R::COLLECTION, id = %id))]
    pub async fn edit(
        &self,
        id: Uuid,
        input: &R::Edit,
        cancel: &CancellationToken,
    ) -> Result<R::Entity, RepositoryError> {
        let request = self.client.build_edit(id, input)?;
        let response = self.execute(request, cancel).await?;
        self.client.parse_edit(response).inspect_err(log_failure)
    }

    #[instrument(skip_all, fields(collection = R::COLLECTION, id = %id))]
    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<(), RepositoryError> {
        let request = self.client.build_delete(id);
        let response = self.execute(request, cancel).await?;
        self.client.parse_delete(response).inspect_err(log_failure)
    }

    async fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, RepositoryError> {
        if cancel.is_cancelled() {
            debug!("cancelled before send");
            return Err(RepositoryError::Cancelled);
        }
        debug!(method = %request.method, url = %request.url, "sending request");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("request cancelled in flight");
                Err(RepositoryError::Cancelled)
            }
            result = self.transport.send(request) => {
                let response = result.inspect_err(|e| warn!(error = %e, "transport failure"))?;
                debug!(status = response.status, "received response");
                Ok(response)
            }
        }
    }
}

fn log_failure(err: &RepositoryError) {
    warn!(error = %err, "request failed");
}

#[async_trait]
impl<T: Transport> PersonRepository for HttpRepository<People, T> {
    async fn create_person(
        &self,
        parameters: &EditPersonParameters,
        cancel: &CancellationToken,
    ) -> Result<Person, RepositoryError> {
        self.create(parameters, cancel).await
    }

    async fn get_person(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Person, RepositoryError> {
        self.get(id, cancel).await
    }

    async fn get_people(
        &self,
        parameters: &QueryPersonParameters,
        cancel: &CancellationToken,
    ) -> Result<Vec<Person>, RepositoryError> {
        self.query(parameters, cancel).await
    }

    async fn edit_person(
        &self,
        id: Uuid,
        parameters: &EditPersonParameters,
        cancel: &CancellationToken,
    ) -> Result<Person, RepositoryError> {
        debug!(changed = ?parameters.changed_fields(), "editing person");
        self.edit(id, parameters, cancel).await
    }

    async fn delete_person(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<(), RepositoryError> {
        self.delete(id, cancel).await
    }
}
