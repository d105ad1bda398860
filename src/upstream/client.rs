//! HTTP client for the control plane's routing endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::document::RoutingDocument;

/// Errors that can occur while fetching the routing document.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection failed or timed out.
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Body is not a routing document.
    #[error("upstream returned an invalid document: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Fetches the routing document from a fixed URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: Url,
}

impl UpstreamClient {
    /// Create a client for `endpoint` with the given request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Request)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// GET the endpoint and decode the body.
    pub async fn fetch(&self) -> Result<RoutingDocument, UpstreamError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        response
            .json::<RoutingDocument>()
            .await
            .map_err(UpstreamError::Decode)
    }
}
