//! Detail stage: per-item detail pages to [`DetailAttributes`].

use futures::stream::{FuturesUnordered, StreamExt};
use scraper::Html;
use vinodb_core::{DetailAttributes, FailurePolicy, ItemStub, NOT_AVAILABLE};

use crate::error::ScraperError;
use crate::extract::{extract, CatalogField};
use crate::fetcher::PageFetcher;
use crate::gate::AdmissionGate;

/// Extracts the descriptive attributes from a detail page.
///
/// Each attribute is searched independently; anything not found is
/// [`NOT_AVAILABLE`]. This never fails.
#[must_use]
pub fn parse_detail_page(html: &str) -> DetailAttributes {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let field = |f: CatalogField| extract(root, f).unwrap_or_else(|| NOT_AVAILABLE.to_owned());

    DetailAttributes {
        producer: field(CatalogField::Producer),
        variety: field(CatalogField::Variety),
        blend: field(CatalogField::Blend),
        wine_type: field(CatalogField::WineType),
    }
}

/// Result of enriching one stub. The stub travels with its own result so
/// completion order never has to line up with submission order.
#[derive(Debug)]
pub struct DetailOutcome {
    /// Zero-based listing position of the stub.
    pub position: usize,
    pub stub: ItemStub,
    pub result: Result<DetailAttributes, ScraperError>,
}

/// Stubs that made it through the detail stage, in listing order.
#[derive(Debug, Default)]
pub struct Enriched {
    pub items: Vec<(ItemStub, DetailAttributes)>,
    pub skipped: usize,
}

/// Fetches and parses one detail page while holding a gate slot.
///
/// The slot covers the request only; parsing happens after it is released.
pub async fn enrich_stub<F: PageFetcher>(
    fetcher: &F,
    gate: &AdmissionGate,
    position: usize,
    stub: ItemStub,
) -> DetailOutcome {
    let fetched = {
        let _permit = gate.acquire().await;
        tracing::debug!(position, url = %stub.detail_url, "fetching detail page");
        fetcher.fetch_html(&stub.detail_url).await
    };

    DetailOutcome {
        position,
        result: fetched.map(|html| parse_detail_page(&html)),
        stub,
    }
}

/// Enriches every stub under `gate`, applying `policy` to failed fetches.
///
/// All requests are submitted at once; the gate decides how many are in
/// flight. Under [`FailurePolicy::Abort`] the first failure returns
/// immediately and the still-pending requests are dropped.
///
/// # Errors
///
/// Returns the first detail failure when `policy` is [`FailurePolicy::Abort`].
pub async fn enrich_all<F: PageFetcher>(
    fetcher: &F,
    gate: &AdmissionGate,
    stubs: Vec<ItemStub>,
    policy: FailurePolicy,
) -> Result<Enriched, ScraperError> {
    let total = stubs.len();
    let mut pending: FuturesUnordered<_> = stubs
        .into_iter()
        .enumerate()
        .map(|(position, stub)| enrich_stub(fetcher, gate, position, stub))
        .collect();

    let mut done: Vec<(usize, ItemStub, DetailAttributes)> = Vec::with_capacity(total);
    let mut skipped = 0usize;

    while let Some(outcome) = pending.next().await {
        match outcome.result {
            Ok(attrs) => done.push((outcome.position, outcome.stub, attrs)),
            Err(err) => match policy {
                FailurePolicy::Abort => {
                    tracing::error!(
                        url = %outcome.stub.detail_url,
                        error = %err,
                        transport = err.is_transport(),
                        in_flight = pending.len(),
                        "detail fetch failed, aborting run"
                    );
                    return Err(err);
                }
                FailurePolicy::SkipAndLog => {
                    tracing::warn!(
                        url = %outcome.stub.detail_url,
                        name = %outcome.stub.name,
                        error = %err,
                        "skipping item, detail fetch failed"
                    );
                    skipped += 1;
                }
            },
        }
    }

    done.sort_by_key(|(position, _, _)| *position);
    Ok(Enriched {
        items: done
            .into_iter()
            .map(|(_, stub, attrs)| (stub, attrs))
            .collect(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATENA_HTML: &str = include_str!("../tests/fixtures/detail_catena.html");
    const RUTINI_HTML: &str = include_str!("../tests/fixtures/detail_rutini.html");

    #[test]
    fn parses_all_attributes() {
        let attrs = parse_detail_page(RUTINI_HTML);
        assert_eq!(attrs.producer, "Rutini Wines");
        assert_eq!(attrs.variety, "Cabernet Franc, Malbec");
        assert_eq!(attrs.blend, "85% Cabernet Franc, 15% Malbec");
        assert_eq!(attrs.wine_type, NOT_AVAILABLE);
    }

    #[test]
    fn missing_blend_defaults_to_not_available() {
        let attrs = parse_detail_page(CATENA_HTML);
        assert_eq!(attrs.producer, "Catena Zapata");
        assert_eq!(attrs.variety, "Malbec");
        assert_eq!(attrs.blend, NOT_AVAILABLE);
        assert_eq!(attrs.wine_type, "Tinto");
    }

    #[test]
    fn empty_page_is_all_not_available() {
        assert_eq!(parse_detail_page(""), DetailAttributes::default());
    }
}
