//! HTTP transport for catalog providers
//!
//! Providers never hold a `reqwest::Client` themselves. They fetch through
//! the [`Getter`] trait, which is injected once at construction and shared by
//! every call; tests swap in a getter that serves canned payloads.
//!
//! Features of the default [`HttpGetter`]:
//! - TLS via rustls, HTTP/2 when offered
//! - Brotli, Gzip, Deflate decompression (auto-negotiated)
//! - Connect and request timeouts from [`HttpConfig`]

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::HttpConfig;

/// Errors raised while talking to a remote web service.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("can't build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
}

/// Fetches the full body behind a URL.
///
/// Implementations must be safe to share between concurrent listings.
#[async_trait]
pub trait Getter: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError>;
}

/// Default [`Getter`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGetter {
    client: Client,
}

impl HttpGetter {
    /// Create a getter with default HTTP settings
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a getter from the `[http]` section of the configuration
    pub fn with_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Getter for HttpGetter {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        debug!("Fetching");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        debug!(status = %status, bytes = body.len(), "Response received");
        Ok(body)
    }
}
