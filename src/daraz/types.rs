//! Result types for the Daraz search scraper.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::selectors::SENTINEL;

/// One extracted product listing. Unresolved fields hold the `"N/A"` sentinel.
/// Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub link: String,
}

impl ProductListing {
    /// True when title, price and link are all unresolved. Such listings are
    /// discarded; a rating alone does not retain one.
    pub fn is_empty_shell(&self) -> bool {
        self.title == SENTINEL && self.price == SENTINEL && self.link == SENTINEL
    }
}

/// Artifacts of one completed search run.
#[derive(Debug, Clone)]
pub struct SearchArtifact {
    /// Extracted listings, at most ten, discovery order.
    pub products: Vec<ProductListing>,
    /// Full-page screenshot of the results page.
    pub screenshot_path: PathBuf,
    /// Persisted JSON result set.
    pub results_path: PathBuf,
}

/// Reduce a query to a filesystem-safe filename stem: every character outside
/// ASCII alphanumerics becomes an underscore.
pub fn sanitize_query(query: &str) -> String {
    query
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
