//! SDK entry point.

use std::time::Duration;

use crate::api::{AGENTS_PATH, AgentsApi, THREADS_PATH, ThreadsApi};
use crate::client::{ApiClient, ClientBuilder};
use crate::error::Result;

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.relu.work/v1";

/// Relu platform SDK.
///
/// Holds one authenticated client per resource collection, each wrapped in
/// its façade. Instances share nothing, so several can coexist with
/// different credentials.
///
/// # Example
///
/// ```no_run
/// use relu_client::{AgentConfig, Relu, RunInput};
///
/// # async fn example() -> relu_client::Result<()> {
/// let relu = Relu::new("key-123")?;
///
/// let agent = relu.agent().create(&AgentConfig::new("bot")).await?;
/// let thread = relu.thread().create(&Default::default()).await?;
/// let run = relu.thread().run(&thread.id, &agent.id, &RunInput::new("hi")).await?;
/// println!("run {} is {:?}", run.id, run.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Relu {
    agent: AgentsApi,
    thread: ThreadsApi,
}

/// The same SDK under its other brand name.
pub type Kortix = Relu;

impl Relu {
    /// Connect to the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Connect to a custom API URL.
    pub fn with_api_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).api_url(api_url).build()
    }

    /// Create a new SDK builder.
    pub fn builder() -> ReluBuilder {
        ReluBuilder::default()
    }

    /// Access the agents API.
    pub fn agent(&self) -> &AgentsApi {
        &self.agent
    }

    /// Access the threads API.
    pub fn thread(&self) -> &ThreadsApi {
        &self.thread
    }

    /// Get the API URL this instance talks to.
    pub fn api_url(&self) -> &url::Url {
        self.agent.client().base_url()
    }
}

/// Builder for [`Relu`].
#[derive(Default)]
pub struct ReluBuilder {
    api_key: Option<String>,
    api_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl std::fmt::Debug for ReluBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReluBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ReluBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API URL (defaults to [`DEFAULT_API_URL`]).
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set a per-request timeout. No timeout is applied unless set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build both clients and their façades.
    pub fn build(self) -> Result<Relu> {
        let agents = self.client(AGENTS_PATH)?;
        let threads = self.client(THREADS_PATH)?;

        tracing::debug!(api_url = %agents.base_url(), "Relu SDK initialised");

        Ok(Relu {
            agent: AgentsApi::new(agents),
            thread: ThreadsApi::new(threads),
        })
    }

    fn client(&self, resource_path: &str) -> Result<ApiClient> {
        let mut builder = ClientBuilder::new()
            .base_url(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))
            .resource_path(resource_path)
            .maybe_timeout(self.timeout);
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.as_str());
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_api_url() {
        let relu = Relu::new("key-123").unwrap();
        assert_eq!(relu.api_url().as_str(), "https://api.relu.work/v1");
        assert_eq!(relu.agent().client().resource_path(), "/agents");
        assert_eq!(relu.thread().client().resource_path(), "/threads");
    }

    #[test]
    fn test_custom_api_url() {
        let relu = Relu::with_api_url("key-123", "http://localhost:8000/api").unwrap();
        assert_eq!(relu.api_url().as_str(), "http://localhost:8000/api");
        assert_eq!(
            relu.thread().client().base_url().as_str(),
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(Relu::builder().build(), Err(Error::Config(_))));
        assert!(matches!(Relu::new(""), Err(Error::Config(_))));
    }

    #[test]
    fn test_timeout_reaches_both_clients() {
        let relu = Relu::builder()
            .api_key("k")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(relu.agent().client().timeout(), Some(Duration::from_secs(5)));
        assert_eq!(relu.thread().client().timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_kortix_alias() {
        let kortix: Kortix = Kortix::new("key-123").unwrap();
        assert_eq!(kortix.api_url().as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_debug_hides_key() {
        let relu = Relu::new("very-secret-key").unwrap();
        assert!(!format!("{:?}", relu).contains("very-secret-key"));
    }
}
