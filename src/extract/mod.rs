//! Extraction engine: locator chains, field resolution, listing discovery.
//!
//! Runs entirely against a static HTML snapshot of the results page, so every
//! chain is evaluated sequentially and the whole pass is deterministic.

pub mod chain;
pub mod fields;
pub mod listings;

pub use chain::{first_valid, ChainOutcome};
pub use listings::{extract_products, locate_listings};
