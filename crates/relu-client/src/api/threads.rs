//! Threads API.

use futures::{Stream, TryStreamExt};

use super::pagination::{fetch_page, paginate};
use super::require_id;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{
    ListFilters, Message, MessagesResponse, NewMessage, Page, Run, RunInput, RunRequest, Thread,
    ThreadConfig, ThreadUpdate,
};

/// Resource path for threads.
pub const THREADS_PATH: &str = "/threads";

/// Threads API client.
///
/// Runs are triggered with a single request; the SDK does not poll or wait
/// for completion. Use [`ThreadsApi::get_run`] to check on a queued run.
#[derive(Debug, Clone)]
pub struct ThreadsApi {
    client: ApiClient,
}

impl ThreadsApi {
    /// Wrap a client bound to [`THREADS_PATH`].
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Create a new thread.
    pub async fn create(&self, config: &ThreadConfig) -> Result<Thread> {
        config.validate()?;
        self.client.post(&[], config).await
    }

    /// Get a thread by ID.
    pub async fn get(&self, id: &str) -> Result<Thread> {
        self.client.get(&[require_id(id, "thread")?]).await
    }

    /// Stream every thread, fetching pages as needed.
    pub fn list(&self, filters: ListFilters) -> impl Stream<Item = Result<Thread>> + Send + use<> {
        paginate(self.client.clone(), filters)
    }

    /// Fetch a single page of threads.
    pub async fn list_page(&self, filters: &ListFilters, cursor: Option<&str>) -> Result<Page<Thread>> {
        fetch_page(&self.client, filters, cursor).await
    }

    /// Fetch every thread, failing on the first page error.
    pub async fn list_all(&self, filters: ListFilters) -> Result<Vec<Thread>> {
        self.list(filters).try_collect().await
    }

    /// Update a thread.
    pub async fn update(&self, id: &str, update: &ThreadUpdate) -> Result<Thread> {
        update.validate()?;
        self.client.patch(&[require_id(id, "thread")?], update).await
    }

    /// Delete a thread.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&[require_id(id, "thread")?]).await
    }

    /// Run an agent against a thread.
    ///
    /// Returns whatever run descriptor the server hands back, which may be
    /// completed or still queued.
    pub async fn run(&self, thread_id: &str, agent_id: &str, input: &RunInput) -> Result<Run> {
        let thread_id = require_id(thread_id, "thread")?;
        let agent_id = require_id(agent_id, "agent")?;
        input.validate()?;

        tracing::debug!(thread_id, agent_id, "Starting run");
        self.client
            .post(&[thread_id, "run"], &RunRequest { agent_id, input })
            .await
    }

    /// Get a run by ID.
    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.client
            .get(&[
                require_id(thread_id, "thread")?,
                "runs",
                require_id(run_id, "run")?,
            ])
            .await
    }

    /// Append a message to a thread without starting a run.
    pub async fn add_message(&self, thread_id: &str, message: &NewMessage) -> Result<Message> {
        message.validate()?;
        self.client
            .post(&[require_id(thread_id, "thread")?, "messages"], message)
            .await
    }

    /// Get the messages in a thread.
    pub async fn messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let response: MessagesResponse = self
            .client
            .get(&[require_id(thread_id, "thread")?, "messages"])
            .await?;
        Ok(response.messages)
    }
}
