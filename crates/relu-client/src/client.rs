//! Authenticated HTTP client bound to one resource collection.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use url::Url;

use crate::error::{Error, Result, error_from_body};

/// An API credential.
///
/// The raw value is only reachable through [`ApiKey::expose`]; `Debug` and
/// `Display` never print it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential, rejecting empty values.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }
        Ok(Self(value))
    }

    /// The raw credential.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// HTTP client bound to a base URL, a resource path and a credential.
///
/// Cloning is cheap; clones share the same connection pool and settings.
///
/// # Example
///
/// ```no_run
/// use relu_client::ClientBuilder;
///
/// # fn example() -> relu_client::Result<()> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.relu.work/v1")
///     .api_key("key-123")
///     .resource_path("/agents")
///     .build()?;
///
/// assert_eq!(client.resource_path(), "/agents");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    /// HTTP client carrying the auth header on every request.
    http: reqwest::Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Resource path segment (e.g. `/agents`).
    resource_path: String,
    /// Per-request timeout, if configured.
    timeout: Option<Duration>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("resource_path", &self.inner.resource_path)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the resource path this client is bound to.
    pub fn resource_path(&self) -> &str {
        &self.inner.resource_path
    }

    /// Get the configured request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the URL for an operation: base + resource path + segments.
    ///
    /// Each segment is percent-encoded as a single path component.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::Config(format!("cannot resolve paths against {}", self.inner.base_url))
            })?
            .pop_if_empty()
            .extend(self.inner.resource_path.split('/').filter(|s| !s.is_empty()))
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let request = self.request(Method::GET, segments)?;
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::GET, segments)?.query(query);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::POST, segments)?.json(body);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a PATCH request.
    pub(crate) async fn patch<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::PATCH, segments)?.json(body);
        let response = self.send(request).await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<()> {
        let request = self.request(Method::DELETE, segments)?;
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        Ok(())
    }

    /// Start a request with the configured timeout applied.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut request = self.inner.http.request(method, url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    /// Send a request. Any failure here means no HTTP response was received.
    ///
    /// A request that could not be built (e.g. an unserializable body) was
    /// never attempted and is reported as [`Error::InvalidRequest`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_builder() {
                tracing::debug!(error = %e, "Request could not be built");
                return Error::InvalidRequest(format!("failed to build request: {e}"));
            }
            tracing::debug!(error = %e, "Request failed before a response was received");
            Error::Transport(e)
        })
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(&self, response: Response) -> Result<T> {
        if response.status().is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: Response) -> Error {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "Request rejected");

        match response.bytes().await {
            Ok(body) => error_from_body(status, &body),
            Err(_) => error_from_body(status, &[]),
        }
    }
}

/// Builder for creating an [`ApiClient`].
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    resource_path: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("resource_path", &self.resource_path)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the platform API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key sent with every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the resource path this client is bound to (e.g. `/agents`).
    pub fn resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    /// Set the request timeout. Without one, requests wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the request timeout from an optional value.
    pub fn maybe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let api_key = ApiKey::new(
            self.api_key
                .ok_or_else(|| Error::Config("api_key is required".to_string()))?,
        )?;

        let base_url = Url::parse(&base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base_url must be an absolute http(s) URL, got '{}'",
                base_url
            )));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| Error::Config("API key contains invalid header characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("relu-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                resource_path: normalize_resource_path(&self.resource_path),
                timeout: self.timeout,
            }),
        })
    }
}

/// Create a client bound to `resource_path` under `base_url`.
pub fn create_client(
    base_url: impl Into<String>,
    api_key: impl Into<String>,
    resource_path: impl Into<String>,
) -> Result<ApiClient> {
    ClientBuilder::new()
        .base_url(base_url)
        .api_key(api_key)
        .resource_path(resource_path)
        .build()
}

fn normalize_resource_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agents_client(base: &str) -> ApiClient {
        create_client(base, "key-123", "/agents").unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().api_key("k").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_requires_api_key() {
        let result = ClientBuilder::new().base_url("http://localhost:8000").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        let result = create_client("http://localhost:8000", "   ", "/agents");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_rejects_relative_url() {
        let result = create_client("api.relu.work/v1", "k", "/agents");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_rejects_non_http_scheme() {
        let result = create_client("mailto:bob@relu.work", "k", "/agents");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_building() {
        let client = agents_client("https://api.relu.work/v1");

        let url = client.url(&[]).unwrap();
        assert_eq!(url.as_str(), "https://api.relu.work/v1/agents");

        let url = client.url(&["a1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.relu.work/v1/agents/a1");
    }

    #[test]
    fn test_url_building_with_trailing_slash() {
        let client = agents_client("https://api.relu.work/v1/");
        let url = client.url(&["a1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.relu.work/v1/agents/a1");
    }

    #[test]
    fn test_url_encodes_ids() {
        let client = create_client("http://localhost:8000", "k", "threads").unwrap();
        let url = client.url(&["a/b c", "run"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/threads/a%2Fb%20c/run");
    }

    #[test]
    fn test_resource_path_normalized() {
        let client = create_client("http://localhost:8000", "k", "threads/").unwrap();
        assert_eq!(client.resource_path(), "/threads");
    }

    #[tokio::test]
    async fn test_unserializable_body_is_invalid_request() {
        let client = agents_client("http://127.0.0.1:9");
        let mut body = std::collections::BTreeMap::new();
        body.insert(vec![1u8, 2], "value");

        let err = client
            .post::<serde_json::Value, _>(&[], &body)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)), "got {err:?}");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_api_key_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
        assert_eq!(key.expose(), "super-secret");

        let client = agents_client("http://localhost:8000");
        assert!(!format!("{:?}", client).contains("key-123"));
    }
}
