//! Scrape orchestration: listing stage, then detail stage, then merge.

use vinodb_core::{AppConfig, FailurePolicy, ItemStub, WineRecord};

use crate::client::catalog_origin;
use crate::detail::enrich_all;
use crate::error::ScraperError;
use crate::fetcher::PageFetcher;
use crate::gate::AdmissionGate;
use crate::listing::{fetch_listing_pages, parse_listing_page};

/// Inputs for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub base_url: String,
    /// Listing pages to fetch, starting at 1.
    pub pages: u32,
    /// Ceiling on simultaneously in-flight detail requests.
    pub max_concurrent_requests: usize,
    /// Applied to listing containers missing a name or link.
    pub on_malformed_item: FailurePolicy,
    /// Applied to detail pages that fail to fetch.
    pub on_detail_failure: FailurePolicy,
}

impl ScrapeOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            pages: config.pages,
            max_concurrent_requests: config.max_concurrent_requests,
            on_malformed_item: config.on_malformed_item,
            on_detail_failure: config.on_detail_failure,
        }
    }
}

/// Output of a completed run.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// One record per surviving item, in listing order.
    pub records: Vec<WineRecord>,
    /// Listing containers dropped under [`FailurePolicy::SkipAndLog`].
    pub skipped_items: usize,
    /// Items dropped because their detail page failed under
    /// [`FailurePolicy::SkipAndLog`].
    pub skipped_details: usize,
}

/// Runs the full pipeline against `fetcher`.
///
/// Every listing page is fetched before any detail request starts. With the
/// default [`FailurePolicy::Abort`] policies any failure fails the run and no
/// records are returned.
///
/// # Errors
///
/// - [`ScraperError::InvalidCatalogUrl`] for an unusable base URL or link.
/// - Any transport error from a listing page.
/// - [`ScraperError::MissingRequiredField`] or a detail transport error when
///   the matching policy is [`FailurePolicy::Abort`].
pub async fn scrape_catalog<F: PageFetcher>(
    fetcher: &F,
    options: &ScrapeOptions,
) -> Result<ScrapeReport, ScraperError> {
    let origin = catalog_origin(&options.base_url)?;

    tracing::info!(
        base_url = %options.base_url,
        pages = options.pages,
        "fetching listing pages"
    );
    let pages = fetch_listing_pages(fetcher, &options.base_url, options.pages).await?;

    let mut stubs: Vec<ItemStub> = Vec::new();
    let mut skipped_items = 0usize;

    for page in &pages {
        let results = parse_listing_page(&page.html, &origin, &page.url);
        tracing::debug!(page = page.page, products = results.len(), "parsed listing page");
        if results.is_empty() {
            tracing::warn!(page = page.page, url = %page.url, "listing page has no products");
        }

        for result in results {
            match result {
                Ok(stub) => stubs.push(stub),
                Err(err) => match options.on_malformed_item {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::SkipAndLog => {
                        tracing::warn!(error = %err, "skipping malformed listing item");
                        skipped_items += 1;
                    }
                },
            }
        }
    }

    let gate = AdmissionGate::new(options.max_concurrent_requests);
    tracing::info!(
        items = stubs.len(),
        max_concurrent = gate.capacity(),
        "fetching detail pages"
    );
    let enriched = enrich_all(fetcher, &gate, stubs, options.on_detail_failure).await?;

    let records: Vec<WineRecord> = enriched
        .items
        .into_iter()
        .map(|(stub, attrs)| WineRecord::from_parts(stub, attrs))
        .collect();

    tracing::info!(
        records = records.len(),
        skipped_items,
        skipped_details = enriched.skipped,
        "scrape complete"
    );

    Ok(ScrapeReport {
        records,
        skipped_items,
        skipped_details: enriched.skipped,
    })
}
