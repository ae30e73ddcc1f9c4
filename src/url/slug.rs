use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("valid file name pattern"));

/// Normalizes a display name into a directory-safe slug
///
/// Lowercases and trims the value, then collapses every run of characters
/// outside `[a-z0-9]` into a single `-`.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::slugify;
///
/// assert_eq!(slugify("  Vinil Adesivo  Brilho 1,22m "), "vinil-adesivo-brilho-1-22m");
/// assert_eq!(slugify("***"), "");
/// ```
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    NON_ALPHANUMERIC_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Returns the last non-empty path segment of a URL
///
/// Product URLs usually end with a slash, so the trailing empty segment is
/// skipped.
pub fn last_path_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Derives a local file name for an image URL
///
/// Uses the last path segment of the URL with unsafe characters replaced by
/// `_`. Names without an extension get `.jpg`; URLs without a file name get
/// `image_<index>.jpg`.
pub fn image_file_name(url: &Url, index: usize) -> String {
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    if name.is_empty() {
        return format!("image_{}.jpg", index);
    }

    let name = if name.contains('.') {
        name.to_string()
    } else {
        format!("{}.jpg", name)
    };

    UNSAFE_FILE_CHARS.replace_all(&name, "_").into_owned()
}
