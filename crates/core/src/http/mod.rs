//! Minimal HTTP GET abstraction shared by the Steam clients.
//!
//! Everything upstream of this crate speaks plain GET with query parameters
//! and JSON bodies, so the seam is a single method returning the body text.

mod reqwest_client;

pub use reqwest_client::ReqwestHttpClient;

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failure of a single GET.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connect or request deadline elapsed.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Could not establish a connection.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Anything else (invalid URL, body decoding, redirect loop...).
    #[error("{0}")]
    Other(String),
}

/// The request URL is stripped from the message: Web API URLs carry the key.
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Status {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

/// Network client used by every upstream call.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Perform a GET and return the body of a 2xx response.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// Append percent-encoded query parameters to `base`.
pub fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let mut url = base.to_string();
    let mut sep = if base.contains('?') { '&' } else { '?' };
    for (key, value) in params {
        url.push(sep);
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
        sep = '&';
    }
    url
}
