//! Selector table for the Daraz search results page.
//!
//! Daraz ships hashed class names that change across deployments, so no single
//! selector can be trusted. Every extraction target is declared here as an
//! ordered fallback chain; the engine in [`crate::extract`] tries the entries
//! strictly in declaration order and stops at the first hit. Markup adaptations
//! are version bumps to this table, not logic changes.

/// Bumped whenever the site markup forces a selector update.
pub const SELECTOR_TABLE_VERSION: u32 = 1;

/// Origin prepended to relative product links.
pub const BASE_ORIGIN: &str = "https://www.daraz.pk";

/// Placeholder for a field no pattern could resolve.
pub const SENTINEL: &str = "N/A";

/// Upper bound on listings retained per run.
pub const MAX_LISTINGS: usize = 10;

/// Predicate applied to a pattern's extracted text before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Trimmed text longer than the given number of characters.
    TextLongerThan(usize),
    /// Contains a recognized currency marker or at least one digit.
    /// Intentionally loose: any digit-bearing text passes.
    PriceLike,
    /// Trimmed text is non-empty.
    NonEmpty,
}

impl Validator {
    pub fn accepts(&self, text: &str) -> bool {
        let trimmed = text.trim();
        match self {
            Validator::TextLongerThan(n) => trimmed.chars().count() > *n,
            Validator::PriceLike => {
                trimmed.contains("Rs")
                    || trimmed.contains('₨')
                    || trimmed.chars().any(|c| c.is_ascii_digit())
            }
            Validator::NonEmpty => !trimmed.is_empty(),
        }
    }
}

/// One extraction target: an ordered pattern chain plus its validator.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
    pub validator: Validator,
}

pub const TITLE: FieldSpec = FieldSpec {
    name: "title",
    patterns: &[
        r#"[class*="title"]"#,
        ".title",
        r#"div[class*="name"]"#,
        r#"[data-qa-locator="product-name"]"#,
        "a[title]",
    ],
    validator: Validator::TextLongerThan(5),
};

pub const PRICE: FieldSpec = FieldSpec {
    name: "price",
    patterns: &[
        r#"[class*="price"]"#,
        ".price",
        r#"span[class*="currency"]"#,
        r#"[class*="ooOxS"]"#,
    ],
    validator: Validator::PriceLike,
};

pub const RATING: FieldSpec = FieldSpec {
    name: "rating",
    patterns: &[
        r#"[class*="rating"]"#,
        ".rating",
        r#"i[class*="star"]"#,
        r#"[class*="ratig"]"#,
    ],
    validator: Validator::NonEmpty,
};

/// One stage of the listing discovery fallback.
#[derive(Debug, Clone, Copy)]
pub enum ListingTier {
    /// Plain CSS query against the whole page.
    Query(&'static str),
    /// Brute force: collect anchors matching `anchor` (at most `cap`), then
    /// lift each to its nearest ancestor whose class contains
    /// `ancestor_class_fragment`, falling back to the immediate parent.
    AnchorAncestor {
        anchor: &'static str,
        ancestor_class_fragment: &'static str,
        cap: usize,
    },
}

/// Discovery tiers, escalating from precise attribute locators to structural
/// heuristics. The first tier yielding at least one candidate wins.
pub const LISTING_TIERS: &[ListingTier] = &[
    ListingTier::Query(r#"[data-qa-locator="product-item"]"#),
    ListingTier::Query(r#"[class*="gridItem"]"#),
    ListingTier::Query(".buTCk"),
    ListingTier::Query(r#"div[class*="Bm3ON"] > div"#),
    ListingTier::AnchorAncestor {
        anchor: r#"a[href*="/products/"]"#,
        ancestor_class_fragment: "grid",
        cap: 10,
    },
];
