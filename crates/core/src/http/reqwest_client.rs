//! reqwest-backed [`HttpGet`] implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::debug;

use super::{HttpGet, TransportError};

const USER_AGENT: &str = concat!("steam-games/", env!("CARGO_PKG_VERSION"));

/// HTTP client with a connect timeout and standard redirect following.
///
/// No overall request timeout is set: a slow body is bounded only by the
/// server, matching how the store fetcher is expected to behave.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(redirect::Policy::default())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpGet for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "GET complete"
        );
        Ok(body)
    }
}
