//! Selector helpers shared by the field rules
//!
//! Every helper degrades to `None` or an empty `Vec` when a rule does not
//! parse or does not match.

use scraper::{ElementRef, Selector};

/// Parses a selector rule, logging and skipping invalid ones
pub(crate) fn selector(rule: &str) -> Option<Selector> {
    match Selector::parse(rule) {
        Ok(selector) => Some(selector),
        Err(_) => {
            tracing::warn!("Invalid selector rule: {}", rule);
            None
        }
    }
}

/// Returns the first element matching the first rule that matches anything
pub(crate) fn select_first<'a>(scope: ElementRef<'a>, rules: &[&str]) -> Option<ElementRef<'a>> {
    rules
        .iter()
        .filter_map(|rule| selector(rule))
        .find_map(|selector| scope.select(&selector).next())
}

/// Returns every element matching `rule` inside `scope`
pub(crate) fn select_all<'a>(scope: ElementRef<'a>, rule: &str) -> Vec<ElementRef<'a>> {
    match selector(rule) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// First non-empty text among the rules, tried in order
pub(crate) fn first_text(scope: ElementRef<'_>, rules: &[&str]) -> Option<String> {
    rules.iter().find_map(|rule| {
        select_all(scope, rule)
            .into_iter()
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// Text content of an element with whitespace runs collapsed to one space
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Trims and collapses every whitespace run into a single space
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Non-empty texts of the anchors inside `element`, in document order
pub(crate) fn anchor_texts(element: ElementRef<'_>) -> Vec<String> {
    select_all(element, "a")
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Case-insensitive substring test
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_first_text_skips_empty_matches() {
        let document = Html::parse_document("<h1> </h1><h2 class='t'>Título</h2>");
        let text = first_text(document.root_element(), &["h1", "h2.t"]);
        assert_eq!(text, Some("Título".to_string()));
    }

    #[test]
    fn test_invalid_rule_is_skipped() {
        let document = Html::parse_document("<p>texto</p>");
        assert!(select_all(document.root_element(), "p[[").is_empty());
        assert_eq!(
            first_text(document.root_element(), &["p[[", "p"]),
            Some("texto".to_string())
        );
    }

    #[test]
    fn test_anchor_texts_filters_empty() {
        let document =
            Html::parse_document("<span><a href='#'>Vinil</a>, <a href='#'> </a><a>Lona</a></span>");
        let span = select_first(document.root_element(), &["span"]).unwrap();
        assert_eq!(anchor_texts(span), vec!["Vinil", "Lona"]);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("INFORMAÇÕES TÉCNICAS:", "informações técnicas"));
        assert!(!contains_ignore_case("Descrição", "vantagens"));
    }
}
