use indexmap::IndexMap;
use serde::Serialize;

/// One row of output: the data extracted from a single product page
///
/// Built once per product URL from a single snapshot of the page markup and
/// never mutated after it is appended to the record set. Absent data is
/// `None` or an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// The product URL (the fetch key)
    pub url: String,

    /// Product name
    pub title: Option<String>,

    /// Short description block, whitespace-collapsed
    pub short_description: Option<String>,

    /// Short and long descriptions joined with `" | "`
    pub description: Option<String>,

    /// Category names in document order
    pub categories: Vec<String>,

    /// Tag names in document order
    pub tags: Vec<String>,

    /// Brand names, first occurrence kept
    pub brand: Vec<String>,

    /// Stock keeping unit, empty when the page has none
    pub sku: String,

    /// Entries of the "advantages" list
    pub advantages: Vec<String>,

    /// Technical specification label -> value, in document order
    pub technical_info: IndexMap<String, String>,

    /// Absolute URLs of the gallery images
    pub image_urls: Vec<String>,

    /// Local references of the saved images
    pub images: Vec<String>,
}

impl ProductRecord {
    /// Record carrying only the URL, emitted when a product could not be processed
    pub fn placeholder(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the record with the local image references attached
    pub fn with_images(self, images: Vec<String>) -> Self {
        Self { images, ..self }
    }

    /// Returns true if nothing beyond the URL was captured
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder(self.url.clone())
    }

    /// Display name used for image folders; empty when the title is missing
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let record = ProductRecord::placeholder("https://shop.example.com/produto/x/");
        assert_eq!(record.url, "https://shop.example.com/produto/x/");
        assert!(record.title.is_none());
        assert!(record.categories.is_empty());
        assert!(record.technical_info.is_empty());
        assert!(record.is_placeholder());
    }

    #[test]
    fn test_with_images() {
        let record = ProductRecord {
            url: "https://shop.example.com/produto/x/".to_string(),
            title: Some("Lona".to_string()),
            ..ProductRecord::default()
        }
        .with_images(vec!["images/lona/a.jpg".to_string()]);

        assert_eq!(record.images, vec!["images/lona/a.jpg"]);
        assert_eq!(record.display_name(), "Lona");
        assert!(!record.is_placeholder());
    }

    #[test]
    fn test_serializes_nulls_and_ordered_map() {
        let mut record = ProductRecord::placeholder("https://shop.example.com/produto/x/");
        record.technical_info.insert("Tamanho".to_string(), "M".to_string());
        record.technical_info.insert("Cor".to_string(), "Azul".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["title"].is_null());
        assert_eq!(json["categories"], serde_json::json!([]));

        let text = serde_json::to_string(&record).unwrap();
        let tamanho = text.find("Tamanho").unwrap();
        let cor = text.find("Cor").unwrap();
        assert!(tamanho < cor);
    }
}
