//! First-match-wins locator chains.
//!
//! Both field extraction and listing discovery resolve through the same
//! mechanism: an ordered list of CSS patterns tried strictly in declaration
//! order, short-circuiting on the first success. A pattern that fails to parse
//! is a normal miss, never an error.

use scraper::{ElementRef, Selector};

use crate::selectors::Validator;

/// Result of running a chain: the winning text, if any, and how many patterns
/// were evaluated before the chain stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub value: Option<String>,
    pub tried: usize,
}

impl ChainOutcome {
    /// The resolved text, or `sentinel` when the chain exhausted.
    pub fn value_or(self, sentinel: &str) -> String {
        self.value.unwrap_or_else(|| sentinel.to_string())
    }
}

/// Try `patterns` in order within `scope`. For each pattern only the first
/// matching node is considered; the first one whose text passes `validator`
/// wins and later patterns are never evaluated.
pub fn first_valid(scope: ElementRef<'_>, patterns: &[&str], validator: Validator) -> ChainOutcome {
    let mut tried = 0;
    for pattern in patterns {
        tried += 1;
        let selector = match Selector::parse(pattern) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(node) = scope.select(&selector).next() {
            let text = element_text(node);
            if validator.accepts(&text) {
                return ChainOutcome {
                    value: Some(text.trim().to_string()),
                    tried,
                };
            }
        }
    }
    ChainOutcome { value: None, tried }
}

/// Page-level variant of the same mechanism: the first pattern matching at
/// least one node wins, returning all of its matches. Used by the precise
/// listing discovery tiers.
pub fn first_populated<'a>(
    scope: ElementRef<'a>,
    patterns: &[&str],
) -> (Vec<ElementRef<'a>>, usize) {
    let mut tried = 0;
    for pattern in patterns {
        tried += 1;
        let selector = match Selector::parse(pattern) {
            Ok(s) => s,
            Err(_) => continue,
        };
        let found: Vec<ElementRef<'a>> = scope.select(&selector).collect();
        if !found.is_empty() {
            return (found, tried);
        }
    }
    (Vec::new(), tried)
}

/// Concatenated text content of a node, like DOM `textContent`.
pub fn element_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_first_pattern_wins() {
        let doc = doc(r#"<div class="item-title">Wireless Mouse</div><span class="price">Rs. 500</span>"#);
        let outcome = first_valid(
            doc.root_element(),
            &[r#"[class*="title"]"#, ".price"],
            Validator::NonEmpty,
        );
        assert_eq!(outcome.value.as_deref(), Some("Wireless Mouse"));
        assert_eq!(outcome.tried, 1);
    }

    #[test]
    fn test_short_circuit_skips_later_patterns() {
        let doc = doc(r#"<p class="a">first hit</p><p class="b">never read</p>"#);
        let patterns = &[".a", ".b", ".c", ".d"];
        let outcome = first_valid(doc.root_element(), patterns, Validator::NonEmpty);
        assert!(outcome.value.is_some());
        assert!(outcome.tried < patterns.len());
        assert_eq!(outcome.tried, 1);
    }

    #[test]
    fn test_validator_rejection_moves_to_next_pattern() {
        // First pattern matches but its text is too short; chain must advance.
        let doc = doc(r#"<div class="title">Mouse</div><div class="name">Wireless Mouse Pro</div>"#);
        let outcome = first_valid(
            doc.root_element(),
            &[".title", ".name"],
            Validator::TextLongerThan(5),
        );
        assert_eq!(outcome.value.as_deref(), Some("Wireless Mouse Pro"));
        assert_eq!(outcome.tried, 2);
    }

    #[test]
    fn test_only_first_match_per_pattern_considered() {
        // Two nodes match ".title"; the second would pass validation but only
        // the first is read, so the chain exhausts.
        let doc = doc(r#"<div class="title">x</div><div class="title">long enough title</div>"#);
        let outcome = first_valid(doc.root_element(), &[".title"], Validator::TextLongerThan(5));
        assert_eq!(outcome.value, None);
    }

    #[test]
    fn test_unparseable_pattern_is_a_miss() {
        let doc = doc(r#"<div class="ok">usable text</div>"#);
        let outcome = first_valid(
            doc.root_element(),
            &["[[[not-a-selector", ".ok"],
            Validator::NonEmpty,
        );
        assert_eq!(outcome.value.as_deref(), Some("usable text"));
        assert_eq!(outcome.tried, 2);
    }

    #[test]
    fn test_exhaustion_yields_none() {
        let doc = doc(r#"<div class="other">text</div>"#);
        let outcome = first_valid(doc.root_element(), &[".a", ".b"], Validator::NonEmpty);
        assert_eq!(outcome.value, None);
        assert_eq!(outcome.tried, 2);
        assert_eq!(outcome.value_or("N/A"), "N/A");
    }

    #[test]
    fn test_first_populated_returns_all_matches_of_winning_pattern() {
        let doc = doc(r#"<div class="card">a</div><div class="card">b</div><div class="grid">c</div>"#);
        let (found, tried) = first_populated(doc.root_element(), &[".missing", ".card", ".grid"]);
        assert_eq!(found.len(), 2);
        assert_eq!(tried, 2);
    }
}
