#![allow(dead_code)]

//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that builds the in-process router
//! with mock Steam backends injected, so the MCP surface can be driven end
//! to end without network access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use steamgames_core::{
    load_config_from_str,
    testing::{MockCatalogProvider, MockGameLibrary, MockHttpClient},
};

/// Re-export fixtures for test convenience
pub use steamgames_core::testing::fixtures;

/// Store endpoint the fixture's fetcher talks to.
pub const STORE_URL: &str = "https://store.test/api/appdetails";

/// Steam id configured for the fixture.
pub const STEAM_ID: &str = "76561197960287930";

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - The app catalog (MockCatalogProvider)
/// - Store detail requests (MockHttpClient)
/// - The user's game library (MockGameLibrary)
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - seeded with `fixtures::catalog()`
    pub catalog: Arc<MockCatalogProvider>,
    /// Mock store HTTP client - configure per-URL responses
    pub store: Arc<MockHttpClient>,
    /// Mock library - configure owned/recent games
    pub library: Arc<MockGameLibrary>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with no tool prefix.
    pub async fn new() -> Self {
        Self::with_prefix("").await
    }

    /// Create a test fixture whose tools are registered under `prefix`.
    pub async fn with_prefix(prefix: &str) -> Self {
        let catalog = Arc::new(MockCatalogProvider::with_entries(fixtures::catalog()));
        let store = Arc::new(MockHttpClient::new());
        let library = Arc::new(MockGameLibrary::new());

        let config = load_config_from_str(&format!(
            r#"
[steam]
api_key = "test-key"
steam_id = "{STEAM_ID}"

[tools]
prefix = "{prefix}"

[store]
base_url = "{STORE_URL}"

[server]
transport = "http"
"#
        ))
        .expect("Failed to parse test config");

        let state = Arc::new(steamgames_server::state::AppState::new(
            config,
            Arc::clone(&catalog) as Arc<dyn steamgames_core::CatalogProvider>,
            Arc::clone(&store) as Arc<dyn steamgames_core::HttpGet>,
            Arc::clone(&library) as Arc<dyn steamgames_core::GameLibrary>,
        ));

        let router = steamgames_server::api::create_router(state);

        Self {
            router,
            catalog,
            store,
            library,
        }
    }

    /// URL the fetcher requests for `app_id` with no region or language.
    pub fn detail_url(app_id: u32) -> String {
        format!("{STORE_URL}?appids={app_id}")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// POST a JSON-RPC message to `/mcp`.
    pub async fn rpc(&self, message: Value) -> TestResponse {
        self.post_raw("/mcp", &message.to_string()).await
    }

    /// POST a raw body to `path`.
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Call a tool and return `(isError, decoded payload)`.
    ///
    /// The payload is the tool's text content parsed as JSON, or the raw text
    /// as a JSON string when it is not JSON.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> (bool, Value) {
        let response = self
            .rpc(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": { "name": name, "arguments": arguments }
            }))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let result = &response.body["result"];
        let text = result["content"][0]["text"]
            .as_str()
            .expect("tool result has no text content");
        let payload =
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));

        (result["isError"] == true, payload)
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
