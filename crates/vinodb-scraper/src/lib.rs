pub mod client;
pub mod detail;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod gate;
pub mod listing;
pub mod pipeline;

pub use client::CatalogClient;
pub use error::ScraperError;
pub use fetcher::PageFetcher;
pub use gate::AdmissionGate;
pub use pipeline::{scrape_catalog, ScrapeOptions, ScrapeReport};
