//! Mock HTTP client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::http::{HttpGet, TransportError};

/// Mock implementation of the HttpGet trait.
///
/// Responses are keyed by exact URL. Unknown URLs answer with a 404 status
/// error. Every requested URL is recorded in call order.
///
/// # Example
///
/// ```rust,ignore
/// use steamgames_core::testing::{MockHttpClient, fixtures};
///
/// let http = Arc::new(MockHttpClient::new());
/// http.set_response(
///     "https://store.steampowered.com/api/appdetails?appids=10",
///     &fixtures::detail_body(10, "Counter-Strike"),
/// ).await;
///
/// let fetcher = ParallelDetailFetcher::new(http.clone(), base_url);
/// let records = fetcher.fetch_all(&[10], None, None).await;
/// assert_eq!(http.requested_urls().await.len(), 1);
/// ```
pub struct MockHttpClient {
    /// Configured outcome per URL.
    responses: Arc<RwLock<HashMap<String, Result<String, TransportError>>>>,
    /// Recorded request URLs.
    requests: Arc<RwLock<Vec<String>>>,
    /// Simulated latency applied to every request.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl std::fmt::Debug for MockHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpClient").finish_non_exhaustive()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            requests: Arc::new(RwLock::new(Vec::new())),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Answer `url` with `body`.
    pub async fn set_response(&self, url: &str, body: &str) {
        self.responses
            .write()
            .await
            .insert(url.to_string(), Ok(body.to_string()));
    }

    /// Fail requests to `url` with `error`.
    pub async fn set_error(&self, url: &str, error: TransportError) {
        self.responses
            .write()
            .await
            .insert(url.to_string(), Err(error));
    }

    /// Delay every request by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// URLs requested so far, in call order.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl HttpGet for MockHttpClient {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.requests.write().await.push(url.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .await
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(TransportError::Status {
                    status: 404,
                    body: format!("no mock response for {url}"),
                })
            })
    }
}
