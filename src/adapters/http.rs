use crate::core::PageSource;
use crate::utils::error::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Plain GET with a fixed User-Agent and timeout. No cookies, no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::Config {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        tracing::debug!("Response status: {}", response.status());
        let response = response.error_for_status()?;

        Ok(response.text().await?)
    }
}
