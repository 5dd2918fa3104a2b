use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Errors that can occur when fetching the feed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error with status code: {0}")]
    HttpError(u16),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

/// Fetches the earthquake feed from its configured URL
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    /// Creates a new Fetcher bound to `url` with a reusable HTTP client
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakefeed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The URL polled by this fetcher
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issues one GET against the feed URL and returns the parsed JSON body
    pub async fn fetch(&self) -> Result<Value, FetchError> {
        debug!("Fetching feed from: {}", self.url);

        let response = match self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!("Network error fetching from {}: {}", self.url, e);
                return Err(FetchError::NetworkError(e.to_string()));
            }
        };

        let status = response.status();

        if !status.is_success() {
            error!(
                "HTTP error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(FetchError::HttpError(status.as_u16()));
        }

        let json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                error!("JSON parsing error: {}", e);
                return Err(FetchError::JsonError(e.to_string()));
            }
        };

        debug!("Successfully fetched and parsed feed document");
        Ok(json)
    }
}
