use async_trait::async_trait;
use tracing::debug;

use crate::error::DataError;

/// Raw transport boundary: URL in, body text out, or a transport
/// failure. Single attempt, no retry, no caching.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, DataError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("fundwatch/0.1")
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, DataError> {
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataError::Transport(format!("request error for {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(DataError::Transport(format!(
                "HTTP error: {} for {url}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DataError::Transport(format!("failed to read body for {url}: {e}")))
    }
}
