//! Listing stage: paginated catalog pages to [`ItemStub`]s.

use futures::future::try_join_all;
use reqwest::Url;
use scraper::Html;
use vinodb_core::{compose_current_price, ItemStub};

use crate::client::resolve_detail_url;
use crate::error::ScraperError;
use crate::extract::{extract, product_containers, CatalogField};
use crate::fetcher::PageFetcher;

/// One fetched listing page.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub page: u32,
    pub url: String,
    pub html: String,
}

/// Builds `{base_url}?page={page}`, preserving any existing query.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidCatalogUrl`] if `base_url` does not parse.
pub fn listing_page_url(base_url: &str, page: u32) -> Result<String, ScraperError> {
    let mut url = Url::parse(base_url).map_err(|e| ScraperError::InvalidCatalogUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    Ok(url.to_string())
}

/// Fetches listing pages `1..=pages` concurrently.
///
/// Pages are returned in page order regardless of completion order. The
/// first failure aborts the batch and drops the remaining requests; there is
/// no partial result. A page past the catalog's last one that still answers
/// 2xx simply yields no products downstream.
///
/// # Errors
///
/// - [`ScraperError::InvalidCatalogUrl`] if `base_url` does not parse.
/// - Any transport error from `fetcher`.
pub async fn fetch_listing_pages<F: PageFetcher>(
    fetcher: &F,
    base_url: &str,
    pages: u32,
) -> Result<Vec<ListingPage>, ScraperError> {
    let urls = (1..=pages)
        .map(|page| listing_page_url(base_url, page).map(|url| (page, url)))
        .collect::<Result<Vec<_>, _>>()?;

    try_join_all(urls.into_iter().map(|(page, url)| async move {
        tracing::debug!(page, pages, %url, "fetching listing page");
        let html = fetcher.fetch_html(&url).await?;
        Ok::<_, ScraperError>(ListingPage { page, url, html })
    }))
    .await
}

/// Extracts one stub per product container on a listing page.
///
/// Each entry is independent: a container without a name or link produces
/// [`ScraperError::MissingRequiredField`] for that position only, leaving
/// the caller to decide whether to abort or skip. Missing price nodes are
/// never an error.
#[must_use]
pub fn parse_listing_page(
    html: &str,
    origin: &Url,
    page_url: &str,
) -> Vec<Result<ItemStub, ScraperError>> {
    let document = Html::parse_document(html);

    product_containers(&document)
        .enumerate()
        .map(|(idx, container)| -> Result<ItemStub, ScraperError> {
            let position = idx + 1;
            let missing = |field: CatalogField| ScraperError::MissingRequiredField {
                field: field.label(),
                page_url: page_url.to_owned(),
                position,
            };

            let name =
                extract(container, CatalogField::Name).ok_or_else(|| missing(CatalogField::Name))?;
            let href = extract(container, CatalogField::DetailLink)
                .ok_or_else(|| missing(CatalogField::DetailLink))?;
            let detail_url = resolve_detail_url(origin, &href)?;

            let listed_price = extract(container, CatalogField::ListedPrice);
            let current_price = match (
                extract(container, CatalogField::PriceFraction),
                extract(container, CatalogField::PriceDecimal),
            ) {
                (Some(fraction), Some(decimal)) => {
                    Some(compose_current_price(&fraction, &decimal))
                }
                _ => None,
            };

            Ok(ItemStub {
                name,
                detail_url,
                listed_price,
                current_price,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
