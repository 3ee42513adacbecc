//! Catalog origin and detail-link resolution.

use reqwest::Url;

use crate::error::ScraperError;

/// Parses the catalog base URL and reduces it to its scheme+host origin.
///
/// Given `"https://www.espaciovino.com.ar/vinos"`, returns
/// `https://www.espaciovino.com.ar/`. Listing markup links to detail pages
/// with host-relative paths, so they are resolved against the origin rather
/// than the listing path.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidCatalogUrl`] if `base_url` does not parse
/// or has no tuple origin (e.g. `data:` URLs).
pub fn catalog_origin(base_url: &str) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidCatalogUrl {
        url: base_url.to_owned(),
        reason,
    };

    let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(invalid("URL has no host origin".to_owned()));
    }
    Url::parse(&origin.ascii_serialization()).map_err(|e| invalid(e.to_string()))
}

/// Resolves a detail link found in listing markup against the catalog origin.
///
/// Absolute links are returned unchanged.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidCatalogUrl`] if the link cannot be joined.
pub fn resolve_detail_url(origin: &Url, href: &str) -> Result<String, ScraperError> {
    origin
        .join(href)
        .map(String::from)
        .map_err(|e| ScraperError::InvalidCatalogUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}

/// Hostname of `url` for log fields; falls back to the full string.
pub(super) fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
