//! HTTP client for the catalog's HTML pages.

mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::fetcher::PageFetcher;

pub use origin::{catalog_origin, resolve_detail_url};
#[cfg(test)]
use origin::extract_domain;

/// Plain-GET HTML client.
///
/// Non-2xx responses become [`ScraperError::UnexpectedStatus`]; network
/// failures and timeouts become [`ScraperError::Http`]. Nothing is retried.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with a per-request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for CatalogClient {
    async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "es-AR,es;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                domain = %origin::extract_domain(url),
                status = status.as_u16(),
                "catalog request failed"
            );
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
