use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for Catalog-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Listing pages the discovery starts from
    #[serde(rename = "start-urls")]
    pub start_urls: Vec<String>,

    /// Lower bound of the pause after every request (milliseconds)
    #[serde(rename = "min-delay-ms", default = "default_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the pause after every request (milliseconds);
    /// defaults to `min_delay_ms`
    #[serde(rename = "max-delay-ms", default)]
    pub max_delay_ms: Option<u64>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl CrawlerConfig {
    /// Effective upper bound of the pause (milliseconds)
    pub fn effective_max_delay_ms(&self) -> u64 {
        self.max_delay_ms.unwrap_or(self.min_delay_ms)
    }
}

/// Request identity presented to the catalog site
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Browser user-agent strings; one is picked per run
    pub agents: Vec<String>,

    /// Value of the Accept-Language header
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

/// Serialization format of the record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// File name used when the config does not name one
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Json => "products.json",
            Self::Csv => "products.csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Destination file; defaults to a per-format file name
    #[serde(default)]
    pub path: Option<String>,

    /// Whether product gallery images are saved locally
    #[serde(rename = "download-images", default)]
    pub download_images: bool,

    /// Base directory for per-product image folders
    #[serde(rename = "images-dir", default = "default_images_dir")]
    pub images_dir: String,
}

impl OutputConfig {
    /// Returns the destination path for the record set
    pub fn output_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(self.format.default_file_name()),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            path: None,
            download_images: false,
            images_dir: default_images_dir(),
        }
    }
}

/// Site-language marker words used by the product extractor
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Path fragment identifying product URLs on listing pages
    #[serde(rename = "product-path-marker", default = "default_product_path_marker")]
    pub product_path_marker: String,

    /// Heading text introducing the advantages list
    #[serde(rename = "advantages-heading", default = "default_advantages_heading")]
    pub advantages_heading: String,

    /// Bold lead-in of the technical information paragraph
    #[serde(
        rename = "technical-info-heading",
        default = "default_technical_info_heading"
    )]
    pub technical_info_heading: String,

    /// Label of the brand entry inside the product metadata block
    #[serde(rename = "brand-label", default = "default_brand_label")]
    pub brand_label: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            product_path_marker: default_product_path_marker(),
            advantages_heading: default_advantages_heading(),
            technical_info_heading: default_technical_info_heading(),
            brand_label: default_brand_label(),
        }
    }
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_accept_language() -> String {
    "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_images_dir() -> String {
    "images".to_string()
}

fn default_product_path_marker() -> String {
    "/produto/".to_string()
}

fn default_advantages_heading() -> String {
    "vantagens".to_string()
}

fn default_technical_info_heading() -> String {
    "informações técnicas".to_string()
}

fn default_brand_label() -> String {
    "Marca".to_string()
}
