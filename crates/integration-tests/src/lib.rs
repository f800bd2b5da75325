//! Integration tests for the customer registry.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p customer-registry-integration-tests
//! ```
//!
//! Each test starts its own server on an ephemeral port with a freshly seeded
//! store, so tests never observe each other's writes.
//!
//! # Test Categories
//!
//! - `customers_http` - REST endpoints under `/customers`
//! - `customers_rpc` - RPC envelope at `/rpc`

use std::net::SocketAddr;

use reqwest::Client;
use serde_json::Value;
use tokio::task::JoinHandle;

use customer_registry_server::config::ServerConfig;
use customer_registry_server::routes;
use customer_registry_server::state::AppState;

/// A server running in the test process.
pub struct TestServer {
    pub client: Client,
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server seeded with the five sample customers.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::with_config(&ServerConfig::default()).await
    }

    /// Start a server with an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_empty() -> Self {
        Self::with_config(&ServerConfig {
            seed_sample_data: false,
            ..ServerConfig::default()
        })
        .await
    }

    async fn with_config(config: &ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = routes::router(AppState::from_config(config));
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Client::new(),
            addr,
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// POST an RPC envelope and return the decoded response body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn rpc(&self, request: &Value) -> Value {
        self.client
            .post(self.url("/rpc"))
            .json(request)
            .send()
            .await
            .expect("RPC request failed")
            .json()
            .await
            .expect("RPC response was not JSON")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
