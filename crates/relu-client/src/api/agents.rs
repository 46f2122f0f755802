//! Agents API.

use futures::{Stream, TryStreamExt};

use super::pagination::{fetch_page, paginate};
use super::require_id;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Agent, AgentConfig, AgentUpdate, ListFilters, Page};

/// Resource path for agents.
pub const AGENTS_PATH: &str = "/agents";

/// Agents API client.
#[derive(Debug, Clone)]
pub struct AgentsApi {
    client: ApiClient,
}

impl AgentsApi {
    /// Wrap a client bound to [`AGENTS_PATH`].
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Create a new agent.
    pub async fn create(&self, config: &AgentConfig) -> Result<Agent> {
        config.validate()?;
        self.client.post(&[], config).await
    }

    /// Get an agent by ID.
    pub async fn get(&self, id: &str) -> Result<Agent> {
        self.client.get(&[require_id(id, "agent")?]).await
    }

    /// Stream every agent, fetching pages as needed.
    pub fn list(&self, filters: ListFilters) -> impl Stream<Item = Result<Agent>> + Send + use<> {
        paginate(self.client.clone(), filters)
    }

    /// Fetch a single page of agents.
    pub async fn list_page(&self, filters: &ListFilters, cursor: Option<&str>) -> Result<Page<Agent>> {
        fetch_page(&self.client, filters, cursor).await
    }

    /// Fetch every agent, failing on the first page error.
    pub async fn list_all(&self, filters: ListFilters) -> Result<Vec<Agent>> {
        self.list(filters).try_collect().await
    }

    /// Update an agent.
    pub async fn update(&self, id: &str, update: &AgentUpdate) -> Result<Agent> {
        update.validate()?;
        self.client.patch(&[require_id(id, "agent")?], update).await
    }

    /// Delete an agent.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&[require_id(id, "agent")?]).await
    }
}
