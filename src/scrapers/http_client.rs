//! HTTP client for fetching the statistics page.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Errors surfaced by the outbound page fetch. Both variants propagate to
/// the caller untouched; the pipeline performs no retries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0} from statistics page")]
    Status(StatusCode),
}

/// Thin reqwest wrapper carrying the user agent and timeout from settings.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch a page body as text. Non-2xx statuses are errors rather than
    /// bodies; the upstream page serves 200 for every real document state.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_name_the_offending_code() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("404"));
    }
}
