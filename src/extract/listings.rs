//! Listing discovery and product assembly.
//!
//! Discovery walks the tier table from precise attribute locators down to a
//! brute-force anchor scan. Tiers are tried strictly in order and the first
//! tier yielding at least one candidate wins; results are never merged across
//! tiers. Zero candidates across all tiers is not an error.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::daraz::ProductListing;
use crate::selectors::{ListingTier, LISTING_TIERS, MAX_LISTINGS, SELECTOR_TABLE_VERSION};

use super::chain::first_populated;
use super::fields;

/// Run the full extraction engine over a static page snapshot.
///
/// Parsing once and extracting from the parsed tree keeps the engine pure and
/// strictly sequential: the same snapshot always produces the same result set.
pub fn extract_products(html: &str, dedupe: bool) -> Vec<ProductListing> {
    debug!("Extracting with selector table v{}", SELECTOR_TABLE_VERSION);
    let doc = Html::parse_document(html);
    let containers = locate_listings(&doc, dedupe);
    if containers.is_empty() {
        info!("No listing containers found with any selector tier");
        return Vec::new();
    }
    info!("Found {} listing containers", containers.len());
    let products = assemble(&containers);
    info!("Assembled {} product listings", products.len());
    products
}

/// Discover listing containers via the escalating tier table.
pub fn locate_listings<'a>(doc: &'a Html, dedupe: bool) -> Vec<ElementRef<'a>> {
    let root = doc.root_element();
    for (idx, tier) in LISTING_TIERS.iter().enumerate() {
        let found = match tier {
            ListingTier::Query(pattern) => {
                let (found, _) = first_populated(root, &[*pattern]);
                found
            }
            ListingTier::AnchorAncestor {
                anchor,
                ancestor_class_fragment,
                cap,
            } => anchor_containers(root, anchor, ancestor_class_fragment, *cap),
        };
        if !found.is_empty() {
            debug!("Listing tier {} matched {} containers", idx + 1, found.len());
            return if dedupe { dedupe_in_order(found) } else { found };
        }
        debug!("Listing tier {} matched nothing", idx + 1);
    }
    Vec::new()
}

/// Assemble listings from the first `MAX_LISTINGS` candidates, dropping any
/// whose title, price and link are all unresolved (a rating alone does not
/// retain a listing). Stops once `MAX_LISTINGS` listings are retained.
pub fn assemble(containers: &[ElementRef<'_>]) -> Vec<ProductListing> {
    let mut listings = Vec::new();
    for (idx, container) in containers.iter().take(MAX_LISTINGS).enumerate() {
        let listing = ProductListing {
            title: fields::title(*container),
            price: fields::price(*container),
            rating: fields::rating(*container),
            link: fields::link(*container),
        };
        if listing.is_empty_shell() {
            debug!("Skipping container #{} (no usable fields)", idx + 1);
            continue;
        }
        listings.push(listing);
        if listings.len() >= MAX_LISTINGS {
            break;
        }
    }
    listings
}

/// Brute-force tier: take the first `cap` product anchors and lift each to its
/// nearest `div` ancestor whose class contains `fragment`, falling back to the
/// immediate parent. Anchors sharing an ancestor produce duplicate containers;
/// deduplication is the caller's explicit opt-in.
fn anchor_containers<'a>(
    root: ElementRef<'a>,
    anchor: &str,
    fragment: &str,
    cap: usize,
) -> Vec<ElementRef<'a>> {
    let selector = match Selector::parse(anchor) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let mut found = Vec::new();
    for link in root.select(&selector).take(cap) {
        if let Some(container) = grid_ancestor(link, fragment).or_else(|| parent_element(link)) {
            found.push(container);
        }
    }
    found
}

fn grid_ancestor<'a>(node: ElementRef<'a>, fragment: &str) -> Option<ElementRef<'a>> {
    node.ancestors().filter_map(ElementRef::wrap).find(|el| {
        el.value().name() == "div"
            && el
                .value()
                .attr("class")
                .map_or(false, |class| class.contains(fragment))
    })
}

fn parent_element(node: ElementRef<'_>) -> Option<ElementRef<'_>> {
    node.parent().and_then(ElementRef::wrap)
}

fn dedupe_in_order(found: Vec<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let mut seen = Vec::new();
    let mut unique = Vec::new();
    for el in found {
        if !seen.contains(&el.id()) {
            seen.push(el.id());
            unique.push(el);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::chain::element_text;

    fn page_html(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    fn page(body: &str) -> Html {
        Html::parse_document(&page_html(body))
    }

    fn listing_html(i: usize) -> String {
        format!(
            r#"<div data-qa-locator="product-item">
                 <div class="item-title">Wireless Mouse model {i}</div>
                 <span class="price">Rs. {i}99</span>
                 <a href="/products/mouse-{i}.html">view</a>
               </div>"#
        )
    }

    #[test]
    fn test_attribute_tier_shadows_class_tiers() {
        // 3 attribute-tier containers plus 5 class-pattern containers: only
        // the attribute tier's elements may be returned.
        let mut body = String::new();
        for i in 0..3 {
            body.push_str(&format!(
                r#"<div data-qa-locator="product-item">attr {i}</div>"#
            ));
        }
        for i in 0..5 {
            body.push_str(&format!(r#"<div class="gridItem-x">class {i}</div>"#));
        }
        let doc = page(&body);
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 3);
        for (i, el) in found.iter().enumerate() {
            assert_eq!(element_text(*el), format!("attr {i}"));
        }
    }

    #[test]
    fn test_class_tier_when_attribute_tier_empty() {
        let doc = page(r#"<div class="gridItem-2x4">a</div><div class="gridItem-2x4">b</div>"#);
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_structural_tier_selects_grid_children() {
        let doc = page(
            r#"<div class="Bm3ON-wrap">
                 <div>child one</div>
                 <div>child two</div>
                 <div>child three</div>
               </div>"#,
        );
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_brute_force_tier_lifts_anchor_to_grid_ancestor() {
        let doc = page(
            r#"<div class="search-grid-col">
                 <span><a href="/products/abc.html">abc</a></span>
               </div>"#,
        );
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 1);
        assert!(found[0].value().attr("class").unwrap().contains("grid"));
    }

    #[test]
    fn test_brute_force_tier_parent_fallback() {
        let doc = page(r#"<section><a href="/products/abc.html">abc</a></section>"#);
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value().name(), "section");
    }

    #[test]
    fn test_brute_force_tier_keeps_duplicates_by_default() {
        let doc = page(
            r#"<div class="grid-row">
                 <a href="/products/a.html">a</a>
                 <a href="/products/b.html">b</a>
               </div>"#,
        );
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id(), found[1].id());
    }

    #[test]
    fn test_brute_force_tier_dedupe_option() {
        let doc = page(
            r#"<div class="grid-row">
                 <a href="/products/a.html">a</a>
                 <a href="/products/b.html">b</a>
               </div>"#,
        );
        let found = locate_listings(&doc, true);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_brute_force_tier_caps_anchors_at_ten() {
        let mut body = String::new();
        for i in 0..15 {
            body.push_str(&format!(
                r#"<div class="grid-cell"><a href="/products/p{i}.html">p{i}</a></div>"#
            ));
        }
        let doc = page(&body);
        let found = locate_listings(&doc, false);
        assert_eq!(found.len(), 10);
    }

    #[test]
    fn test_all_tiers_empty_is_not_an_error() {
        let doc = page(r#"<p>zzzznoresults</p>"#);
        assert!(locate_listings(&doc, false).is_empty());
        assert!(extract_products("<html><body><p>nothing here</p></body></html>", false).is_empty());
    }

    #[test]
    fn test_twelve_containers_yield_ten_listings() {
        let body: String = (0..12).map(listing_html).collect();
        let products = extract_products(&page_html(&body), false);
        assert_eq!(products.len(), 10);
        for p in &products {
            assert_ne!(p.title, "N/A");
            assert_ne!(p.price, "N/A");
            assert_ne!(p.link, "N/A");
        }
        assert_eq!(products[0].title, "Wireless Mouse model 0");
        assert_eq!(products[9].link, "https://www.daraz.pk/products/mouse-9.html");
    }

    #[test]
    fn test_empty_shell_containers_are_discarded() {
        // Second container yields no title, price or link; rating alone does
        // not retain it.
        let body = format!(
            "{}{}",
            listing_html(1),
            r#"<div data-qa-locator="product-item"><i class="star">4.0</i></div>"#
        );
        let products = extract_products(&page_html(&body), false);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Wireless Mouse model 1");
    }

    #[test]
    fn test_result_set_never_exceeds_cap() {
        for n in [0usize, 1, 9, 10, 11, 25] {
            let body: String = (0..n).map(listing_html).collect();
            let products = extract_products(&page_html(&body), false);
            assert!(products.len() <= MAX_LISTINGS);
            assert_eq!(products.len(), n.min(MAX_LISTINGS));
        }
    }

    #[test]
    fn test_extraction_is_idempotent_over_a_static_snapshot() {
        let body: String = (0..7).map(listing_html).collect();
        let html = page_html(&body);
        let first = extract_products(&html, false);
        let second = extract_products(&html, false);
        assert_eq!(first, second);
    }
}
