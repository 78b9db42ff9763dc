//! Daraz search results scraper.
//!
//! Automates one search against daraz.pk, captures a full-page screenshot and
//! extracts up to ten product listings (title, price, rating, link) from the
//! first results screen. The site's class names are deployment-unstable, so
//! every field and the listing containers themselves resolve through ordered
//! fallback chains declared in [`selectors`]; unresolved fields degrade to the
//! `"N/A"` sentinel instead of failing the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use daraz_scraper::{DarazScraper, Scraper, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut scraper = DarazScraper::new(ScraperConfig::new());
//!
//!     let artifact = scraper.execute("wireless mouse").await.unwrap();
//!     println!("{} products, screenshot: {:?}",
//!         artifact.products.len(), artifact.screenshot_path);
//! }
//! ```
//!
//! # As a tower service
//!
//! ```rust,ignore
//! use daraz_scraper::{ScraperService, SearchRequest};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!     let artifact = service.call(SearchRequest::new("usb hub")).await.unwrap();
//!     println!("{} products", artifact.products.len());
//! }
//! ```

pub mod config;
pub mod daraz;
pub mod error;
pub mod extract;
pub mod selectors;
pub mod service;
pub mod traits;

// Re-export the main types
pub use config::ScraperConfig;
pub use daraz::{DarazScraper, ProductListing, SearchArtifact};
pub use error::ScraperError;
pub use service::{ScraperService, SearchRequest};
pub use traits::Scraper;
