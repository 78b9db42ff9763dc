//! Per-field resolution for a single listing container.
//!
//! Each field runs its own chain from the selector table and degrades to the
//! sentinel on exhaustion. Fields are independent: a miss on one never blocks
//! the others.

use scraper::{ElementRef, Selector};

use crate::selectors::{self, BASE_ORIGIN, SENTINEL};

use super::chain::first_valid;

/// Resolve the product title. When the pattern chain exhausts, a secondary
/// attempt reads the `title` attribute of the container's first anchor.
pub fn title(container: ElementRef<'_>) -> String {
    let spec = selectors::TITLE;
    let outcome = first_valid(container, spec.patterns, spec.validator);
    if let Some(value) = outcome.value {
        return value;
    }
    first_anchor(container)
        .and_then(|a| a.value().attr("title"))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .unwrap_or_else(|| SENTINEL.to_string())
}

/// Resolve the price text. The validator is deliberately loose (any
/// digit-bearing text passes) to survive currency formatting changes.
pub fn price(container: ElementRef<'_>) -> String {
    let spec = selectors::PRICE;
    first_valid(container, spec.patterns, spec.validator).value_or(SENTINEL)
}

/// Resolve the rating text.
pub fn rating(container: ElementRef<'_>) -> String {
    let spec = selectors::RATING;
    first_valid(container, spec.patterns, spec.validator).value_or(SENTINEL)
}

/// Resolve the product link from the container's first anchor. Relative hrefs
/// are absolutized against the site origin.
pub fn link(container: ElementRef<'_>) -> String {
    match first_anchor(container).and_then(|a| a.value().attr("href")) {
        Some(href) if href.starts_with("http") => href.to_string(),
        Some(href) => format!("{}{}", BASE_ORIGIN, href),
        None => SENTINEL.to_string(),
    }
}

fn first_anchor(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("a").ok()?;
    container.select(&selector).next()
}
