//! Daraz scraper module.
//!
//! Drives a search against daraz.pk and extracts the first page of listings.

mod scraper;
mod types;

pub use scraper::DarazScraper;
pub use types::{sanitize_query, ProductListing, SearchArtifact};
