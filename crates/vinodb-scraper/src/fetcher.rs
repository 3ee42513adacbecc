//! Transport seam between the scrape stages and the network.

use std::future::Future;

use crate::error::ScraperError;

/// Source of HTML documents for the listing and detail stages.
///
/// [`CatalogClient`](crate::CatalogClient) is the production implementation.
/// The stages only ever call [`fetch_html`](Self::fetch_html), so tests can
/// swap in an in-memory fetcher to script responses, delays, and failures.
pub trait PageFetcher: Sync {
    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Implementations return a transport error ([`ScraperError::Http`] or
    /// [`ScraperError::UnexpectedStatus`]) when the page cannot be retrieved.
    fn fetch_html(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}
