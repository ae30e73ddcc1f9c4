//! Listing page parser
//!
//! Extracts from a category listing page:
//! - the product links shown on the page (absolute URLs, document order)
//! - the link to the next listing page, if any
//!
//! Both use ordered selector rules; the first rule with a non-empty result
//! wins.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Product-card link rules, most specific first
const PRODUCT_LINK_SELECTORS: &[&str] = &[
    "li.product a.woocommerce-LoopProduct-link, li.product a.woocommerce-loop-product__link",
    "a.button.product_type_simple",
];

/// Pager "next" link variants, in order of preference
const NEXT_PAGE_SELECTORS: &[&str] = &[
    "a.next.page-numbers",
    "a.page-numbers.next",
    "li.next a",
    "a.next",
    "link[rel='next']",
];

/// Path fragment used when the config does not override it
pub const DEFAULT_PRODUCT_PATH_MARKER: &str = "/produto/";

/// Links found on one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Product links in document order; may contain duplicates
    pub product_links: Vec<Url>,

    /// Next listing page, if the pager has one
    pub next_url: Option<Url>,
}

/// Listing parser configured with the site's product-path marker
#[derive(Debug, Clone)]
pub struct ListingParser {
    product_path_marker: String,
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT_PATH_MARKER)
    }
}

impl ListingParser {
    /// Creates a parser using the given product-path marker for the fallback rule
    pub fn new(product_path_marker: impl Into<String>) -> Self {
        Self {
            product_path_marker: product_path_marker.into(),
        }
    }

    /// Parses listing markup; all links are resolved against `base_url`
    pub fn parse(&self, html: &str, base_url: &Url) -> ListingPage {
        let document = Html::parse_document(html);

        ListingPage {
            product_links: self.product_links(&document, base_url),
            next_url: next_page(&document, base_url),
        }
    }

    /// Finds product links with the primary rules, falling back to any link
    /// whose path contains the product-path marker
    fn product_links(&self, document: &Html, base_url: &Url) -> Vec<Url> {
        for rule in PRODUCT_LINK_SELECTORS {
            let links = select_links(document, rule, base_url);
            if !links.is_empty() {
                return links;
            }
        }

        tracing::debug!(
            "No product cards on {}, falling back to '{}' links",
            base_url,
            self.product_path_marker
        );

        select_links(document, "a[href]", base_url)
            .into_iter()
            .filter(|link| link.path().contains(&self.product_path_marker))
            .collect()
    }
}

/// Convenience function parsing a listing page with the default marker
///
/// # Example
///
/// ```
/// use catalog_harvest::crawler::parse_listing;
/// use url::Url;
///
/// let html = r#"<ul class="products">
///   <li class="product"><a class="woocommerce-LoopProduct-link" href="/produto/lona/">Lona</a></li>
/// </ul>
/// <a class="next page-numbers" href="/loja/page/2/">→</a>"#;
/// let base = Url::parse("https://shop.example.com/loja/").unwrap();
///
/// let page = parse_listing(html, &base);
/// assert_eq!(page.product_links[0].as_str(), "https://shop.example.com/produto/lona/");
/// assert_eq!(page.next_url.unwrap().as_str(), "https://shop.example.com/loja/page/2/");
/// ```
pub fn parse_listing(html: &str, base_url: &Url) -> ListingPage {
    ListingParser::default().parse(html, base_url)
}

/// Returns the first resolvable next-page link among the pager rules
fn next_page(document: &Html, base_url: &Url) -> Option<Url> {
    NEXT_PAGE_SELECTORS
        .iter()
        .find_map(|rule| select_links(document, rule, base_url).into_iter().next())
}

/// Collects the resolved `href` of every element matching `rule`
fn select_links(document: &Html, rule: &str, base_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse(rule) else {
        tracing::warn!("Invalid selector rule: {}", rule);
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}
