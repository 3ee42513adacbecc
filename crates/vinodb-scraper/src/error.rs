use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid catalog URL \"{url}\": {reason}")]
    InvalidCatalogUrl { url: String, reason: String },

    #[error("product #{position} on {page_url} has no {field}")]
    MissingRequiredField {
        field: &'static str,
        page_url: String,
        position: usize,
    },
}

impl ScraperError {
    /// `true` for network failures and non-2xx responses.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
        )
    }
}
