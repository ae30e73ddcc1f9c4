//! Product page extraction
//!
//! Each field has its own rule and its own fallbacks. A rule that finds
//! nothing yields `None` or an empty collection; no rule can blank out
//! another field.

use crate::config::ExtractionConfig;
use crate::extract::record::ProductRecord;
use crate::extract::rules::{
    anchor_texts, collapse_whitespace, contains_ignore_case, element_text, first_text, select_all,
    select_first,
};
use crate::extract::technical::parse_technical_info;
use crate::url::resolve_link;
use indexmap::{IndexMap, IndexSet};
use scraper::{ElementRef, Html};
use url::Url;

/// Title rules, most specific first
const TITLE_SELECTORS: &[&str] = &["h2.product_title.entry-title", "h1.product_title", "h1"];

const SHORT_DESCRIPTION_SELECTORS: &[&str] =
    &["div.woocommerce-product-details__short-description"];

/// Long description containers, in order of preference
const LONG_DESCRIPTION_SELECTORS: &[&str] =
    &["#tab-description", "div.woocommerce-Tabs-panel--description"];

/// Container of the advantages and technical-info blocks
const DESCRIPTION_TAB_SELECTORS: &[&str] = &["div#tab-description"];

const CATEGORY_SELECTORS: &[&str] = &["div.product_meta span.posted_in", "span.posted_in"];
const BREADCRUMB_SELECTOR: &str = "nav.woocommerce-breadcrumb a";
const TAG_SELECTORS: &[&str] = &["div.product_meta span.tagged_as", "span.tagged_as"];
const PRODUCT_META_SELECTORS: &[&str] = &["div.product_meta"];
const SKU_SELECTORS: &[&str] = &[".sku"];

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
const LEAD_IN_SELECTOR: &str = "strong, b";

const GALLERY_IMAGE_SELECTOR: &str =
    "figure.woocommerce-product-gallery img, div.woocommerce-product-gallery img";

/// Image attributes, the plain source first and lazy-load variants after
const IMAGE_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src", "data-large_image"];

/// Separator between the short and the long description
const DESCRIPTION_SEPARATOR: &str = " | ";

/// Extracts product records using the site's marker words
#[derive(Debug, Clone, Default)]
pub struct ProductExtractor {
    markers: ExtractionConfig,
}

impl ProductExtractor {
    /// Creates an extractor using the given marker words
    pub fn new(markers: ExtractionConfig) -> Self {
        Self { markers }
    }

    /// Builds a record from a product page snapshot
    ///
    /// Never fails: any field whose source is absent is left empty.
    pub fn extract(&self, html: &str, url: &Url) -> ProductRecord {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let description_tab = select_first(root, DESCRIPTION_TAB_SELECTORS);

        let short_description = first_text(root, SHORT_DESCRIPTION_SELECTORS);
        let long_description = first_text(root, LONG_DESCRIPTION_SELECTORS);

        ProductRecord {
            url: url.to_string(),
            title: first_text(root, TITLE_SELECTORS),
            description: join_descriptions(short_description.as_deref(), long_description.as_deref()),
            short_description,
            categories: categories(root),
            tags: tags(root),
            brand: self.brand(root),
            sku: sku(root),
            advantages: self.advantages(&document, description_tab.unwrap_or(root)),
            technical_info: self.technical_info(description_tab.unwrap_or(root)),
            image_urls: gallery_images(root, url),
            images: Vec::new(),
        }
    }

    /// Brand anchors of the first metadata entry labelled with the brand label
    fn brand(&self, root: ElementRef<'_>) -> Vec<String> {
        let Some(meta) = select_first(root, PRODUCT_META_SELECTORS) else {
            return Vec::new();
        };

        select_all(meta, "span")
            .into_iter()
            .filter(|span| !has_nested_span(*span))
            .find(|span| own_label(*span).starts_with(&self.markers.brand_label))
            .map(|span| {
                anchor_texts(span)
                    .into_iter()
                    .collect::<IndexSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Items of the first list following the advantages heading
    fn advantages(&self, document: &Html, scope: ElementRef<'_>) -> Vec<String> {
        let Some(heading) = select_all(scope, HEADING_SELECTOR).into_iter().find(|heading| {
            contains_ignore_case(&element_text(*heading), &self.markers.advantages_heading)
        }) else {
            return Vec::new();
        };

        let Some(list) = first_list_after(document, heading) else {
            tracing::debug!("Advantages heading found without a following list");
            return Vec::new();
        };

        select_all(list, "li")
            .into_iter()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Label/value pairs of the paragraph led by the technical-info marker
    fn technical_info(&self, scope: ElementRef<'_>) -> IndexMap<String, String> {
        let heading = &self.markers.technical_info_heading;

        select_all(scope, "p")
            .into_iter()
            .find(|paragraph| {
                select_first(*paragraph, &[LEAD_IN_SELECTOR])
                    .is_some_and(|lead_in| contains_ignore_case(&element_text(lead_in), heading))
            })
            .map(|paragraph| parse_technical_info(&paragraph.inner_html(), heading))
            .unwrap_or_default()
    }
}

/// Extracts a record with the default marker words
///
/// # Example
///
/// ```
/// use catalog_harvest::extract_product;
/// use url::Url;
///
/// let html = r#"<h1 class="product_title">Lona 440g</h1><span class="sku">LN-440</span>"#;
/// let url = Url::parse("https://shop.example.com/produto/lona-440g/").unwrap();
///
/// let record = extract_product(html, &url);
/// assert_eq!(record.title.as_deref(), Some("Lona 440g"));
/// assert_eq!(record.sku, "LN-440");
/// ```
pub fn extract_product(html: &str, url: &Url) -> ProductRecord {
    ProductExtractor::default().extract(html, url)
}

/// Category anchors of the metadata block, falling back to the breadcrumb trail
fn categories(root: ElementRef<'_>) -> Vec<String> {
    let categories = select_first(root, CATEGORY_SELECTORS)
        .map(anchor_texts)
        .unwrap_or_default();

    if !categories.is_empty() {
        return categories;
    }

    select_all(root, BREADCRUMB_SELECTOR)
        .into_iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn tags(root: ElementRef<'_>) -> Vec<String> {
    select_first(root, TAG_SELECTORS)
        .map(anchor_texts)
        .unwrap_or_default()
}

fn sku(root: ElementRef<'_>) -> String {
    select_first(root, SKU_SELECTORS)
        .map(element_text)
        .unwrap_or_default()
}

/// Joins the non-empty description parts; None when both are empty
fn join_descriptions(short: Option<&str>, long: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [short, long]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(DESCRIPTION_SEPARATOR))
    }
}

/// Leading text of an element, up to its first child element
fn own_label(element: ElementRef<'_>) -> String {
    let label: String = element
        .children()
        .map_while(|node| node.value().as_text().map(|text| &**text))
        .collect();
    collapse_whitespace(&label)
}

fn has_nested_span(element: ElementRef<'_>) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| child.value().name() == "span")
}

/// Finds the first `ul`/`ol` after `anchor` in document order
fn first_list_after<'a>(document: &'a Html, anchor: ElementRef<'_>) -> Option<ElementRef<'a>> {
    let mut passed_anchor = false;

    for node in document.tree.root().descendants() {
        if node.id() == anchor.id() {
            passed_anchor = true;
            continue;
        }
        if !passed_anchor {
            continue;
        }
        if let Some(element) = ElementRef::wrap(node) {
            if matches!(element.value().name(), "ul" | "ol") {
                return Some(element);
            }
        }
    }
    None
}

/// Absolute gallery image URLs, first occurrence kept
fn gallery_images(root: ElementRef<'_>, page_url: &Url) -> Vec<String> {
    select_all(root, GALLERY_IMAGE_SELECTOR)
        .into_iter()
        .filter_map(|img| {
            IMAGE_ATTRS
                .iter()
                .filter_map(|attr| img.value().attr(attr))
                .find_map(|value| resolve_link(value, page_url))
        })
        .map(String::from)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
