use crate::error::{HarvestError, Result};
use reqwest::Client;
use std::future::Future;
use tracing::debug;

/// Source of raw HTML documents.
pub trait DocumentFetcher: Send + Sync {
    /// Returns the body of `url`, or an error for a transport failure or a
    /// non-success status.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// `client` carries the request timeout and user agent.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(HarvestError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
