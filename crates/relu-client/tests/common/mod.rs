//! Common test utilities for integration tests.

#![allow(dead_code)]

use relu_client::Relu;
use wiremock::MockServer;

/// API key used by most tests.
pub const API_KEY: &str = "key-123";

/// Expected authorization header value for [`API_KEY`].
pub const BEARER: &str = "Bearer key-123";

/// A mock platform API plus an SDK pointed at it.
pub struct TestApi {
    /// The mock server.
    pub server: MockServer,
    /// SDK configured for the mock server.
    pub relu: Relu,
}

impl TestApi {
    /// Start a mock server and build an SDK against `<server>/v1`.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let relu = Relu::with_api_url(API_KEY, api_url(&server)).unwrap();
        Self { server, relu }
    }
}

/// API URL (with `/v1` prefix) for a mock server.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/v1", server.uri())
}

/// A URL that refuses connections.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
