use crate::UrlError;
use url::Url;

/// Parses a configured start URL, accepting only HTTP(S)
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::parse_http_url;
///
/// let url = parse_http_url("https://shop.example.com/categoria/").unwrap();
/// assert_eq!(url.host_str(), Some("shop.example.com"));
/// assert!(parse_http_url("mailto:sales@example.com").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only anchors
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// The fragment of a kept link is removed, so `/produto/a/#reviews` and
/// `/produto/a/` resolve to the same URL.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/categoria/tintas/").unwrap();
/// let resolved = resolve_link("/produto/tinta-azul/", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://shop.example.com/produto/tinta-azul/");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute_url)
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" =>
        {
            absolute_url.set_fragment(None);
            Some(absolute_url)
        }
        _ => None,
    }
}
