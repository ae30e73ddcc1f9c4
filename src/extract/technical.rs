//! Technical information parsing
//!
//! The technical sheet is a single paragraph whose bold lead-in names it,
//! followed by `Label: value` lines separated by `<br>` tags:
//!
//! ```html
//! <p><strong>Informações Técnicas:</strong><br>Cor: Azul<br>Tamanho: M</p>
//! ```

use crate::extract::rules::collapse_whitespace;
use indexmap::IndexMap;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break pattern"));

/// Canonical form every line-break variant is rewritten to before splitting
const CANONICAL_BREAK: &str = "<br>";

/// Parses the inner markup of a technical-info paragraph
///
/// Each `<br>`-separated segment is stripped to plain text. Segments that are
/// empty, that repeat the `heading` lead-in, or that have no `:` are skipped.
/// The rest are split on the first colon. A repeated label keeps the value
/// of its last occurrence.
pub fn parse_technical_info(inner_html: &str, heading: &str) -> IndexMap<String, String> {
    let heading = heading.to_lowercase();
    let normalized = LINE_BREAK.replace_all(inner_html, CANONICAL_BREAK);

    let mut info = IndexMap::new();
    for segment in normalized.split(CANONICAL_BREAK) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let text = strip_tags(segment);
        if text.is_empty() || text.to_lowercase().starts_with(&heading) {
            continue;
        }

        let Some((key, value)) = text.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        info.insert(key.to_string(), value.trim().to_string());
    }
    info
}

/// Plain text of a markup fragment, whitespace-collapsed
fn strip_tags(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    collapse_whitespace(&parsed.root_element().text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING: &str = "informações técnicas";

    #[test]
    fn test_last_occurrence_wins() {
        let info = parse_technical_info(
            "<strong>Informações Técnicas:</strong> <br>Cor: Azul<br>Tamanho: M<br>Cor: Vermelho",
            HEADING,
        );

        assert_eq!(info.len(), 2);
        assert_eq!(info.get("Cor").map(String::as_str), Some("Vermelho"));
        assert_eq!(info.get("Tamanho").map(String::as_str), Some("M"));
    }

    #[test]
    fn test_break_variants_normalized() {
        let info = parse_technical_info(
            "Informações Técnicas:<br/>Largura: 1,22m<BR />Gramatura: 440g<br >Acabamento: Brilho",
            HEADING,
        );

        assert_eq!(
            info.keys().collect::<Vec<_>>(),
            vec!["Largura", "Gramatura", "Acabamento"]
        );
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let info = parse_technical_info("Horário: 08:00 às 18:00", HEADING);
        assert_eq!(info.get("Horário").map(String::as_str), Some("08:00 às 18:00"));
    }

    #[test]
    fn test_lines_without_separator_skipped() {
        let info = parse_technical_info("Produto importado<br>: sem rótulo<br>Cor: Preto", HEADING);
        assert_eq!(info.len(), 1);
        assert_eq!(info.get("Cor").map(String::as_str), Some("Preto"));
    }

    #[test]
    fn test_inline_tags_and_entities_stripped() {
        let info = parse_technical_info(
            "<em>Material</em>: <span>PVC &amp; poliéster</span>",
            HEADING,
        );
        assert_eq!(info.get("Material").map(String::as_str), Some("PVC & poliéster"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_technical_info("", HEADING).is_empty());
    }
}
