//! Harvest coordinator - main pipeline orchestration logic
//!
//! This module sequences a complete harvest:
//! - Discovering product URLs from the listing pages
//! - Fetching and extracting each product, in sorted URL order
//! - Optionally saving product images
//! - Handing the record set to the configured sink
//!
//! Every discovered URL yields exactly one record. A product whose page cannot
//! be fetched, or whose processing fails afterwards, yields a placeholder
//! carrying only its URL; failures never cross item boundaries.

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::{CrawlFrontier, DiscoveryStats};
use crate::crawler::listing::ListingParser;
use crate::extract::{ProductExtractor, ProductRecord};
use crate::output::{sink_for, HarvestStatistics};
use crate::state::ItemOutcome;
use crate::storage::{ImageStore, SavedImages};
use crate::url::parse_http_url;
use crate::{HarvestError, Result};
use std::path::PathBuf;
use url::Url;

/// Records and statistics produced by one pipeline run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// One record per discovered product, in sorted URL order
    pub records: Vec<ProductRecord>,

    /// Counters collected during the run
    pub statistics: HarvestStatistics,
}

/// Result of a complete harvest, after the sink has written
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// File the record set was written to
    pub output_path: PathBuf,

    /// Counters collected during the run
    pub statistics: HarvestStatistics,
}

/// Main pipeline coordinator structure
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    fetcher: F,
    extractor: ProductExtractor,
    image_store: Option<ImageStore>,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config)?;
        tracing::info!("Using user agent: {}", fetcher.user_agent());
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around an arbitrary fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Self {
        let extractor = ProductExtractor::new(config.extraction.clone());
        let image_store = config
            .output
            .download_images
            .then(|| ImageStore::new(&config.output.images_dir));

        Self {
            config,
            fetcher,
            extractor,
            image_store,
        }
    }

    /// Runs the crawl frontier over the configured start URLs
    ///
    /// # Returns
    ///
    /// * `Ok((urls, stats))` - Sorted, deduplicated product URLs
    /// * `Err(HarvestError)` - A start URL is not a valid http(s) URL
    pub async fn discover(&mut self) -> Result<(Vec<Url>, DiscoveryStats)> {
        let start_urls = self
            .config
            .crawler
            .start_urls
            .iter()
            .map(|u| parse_http_url(u))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::info!("Starting discovery from {} listing pages", start_urls.len());

        let parser = ListingParser::new(self.config.extraction.product_path_marker.clone());
        let frontier = CrawlFrontier::new(start_urls, parser);
        Ok(frontier.discover(&mut self.fetcher).await)
    }

    /// Runs the whole pipeline and returns the record set
    ///
    /// Only a start-URL error can fail the run here; every per-product
    /// failure is absorbed into a placeholder record.
    pub async fn run(&mut self) -> Result<HarvestReport> {
        let mut statistics = HarvestStatistics::new();

        let (product_urls, discovery) = self.discover().await?;
        statistics.record_discovery(discovery, product_urls.len());

        let total = product_urls.len();
        tracing::info!("{} products to process", total);

        let mut records = Vec::with_capacity(total);
        for (index, product_url) in product_urls.iter().enumerate() {
            tracing::info!("[{}/{}] {}", index + 1, total, product_url);

            let (record, outcome) = match self.process_product(product_url).await {
                Ok((record, saved)) => {
                    statistics.record_images(&saved);
                    (record, ItemOutcome::Extracted)
                }
                Err(HarvestError::NoContent { url }) => {
                    tracing::warn!("Could not fetch product {}", url);
                    (ProductRecord::placeholder(product_url.as_str()), ItemOutcome::Unreachable)
                }
                Err(e) => {
                    tracing::warn!("Failed to process product {}: {}", product_url, e);
                    (ProductRecord::placeholder(product_url.as_str()), ItemOutcome::Failed)
                }
            };

            statistics.record_outcome(outcome);
            records.push(record);
        }

        statistics.finish();
        tracing::info!(
            "Harvest completed: {} extracted, {} placeholders",
            statistics.products_extracted,
            statistics.placeholders()
        );

        Ok(HarvestReport {
            records,
            statistics,
        })
    }

    /// Fetches, extracts and (optionally) saves the images of one product
    async fn process_product(&mut self, product_url: &Url) -> Result<(ProductRecord, SavedImages)> {
        let html = self
            .fetcher
            .fetch_page(product_url)
            .await
            .ok_or_else(|| HarvestError::NoContent {
                url: product_url.to_string(),
            })?;

        let record = self.extractor.extract(&html, product_url);
        tracing::debug!(
            "Extracted {:?}: {} categories, {} images",
            record.title,
            record.categories.len(),
            record.image_urls.len()
        );

        let saved = match &self.image_store {
            Some(store) => {
                store
                    .save_product_images(
                        &mut self.fetcher,
                        &record.image_urls,
                        record.display_name(),
                        product_url,
                    )
                    .await?
            }
            None => SavedImages::default(),
        };

        let images = saved.references.clone();
        Ok((record.with_images(images), saved))
    }

    /// Consumes the coordinator, returning its fetcher
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }
}

/// Runs a complete harvest and writes the record set
///
/// This is the main entry point. It will:
/// 1. Build the HTTP fetcher (one user agent for the whole run)
/// 2. Discover product URLs across the paginated listings
/// 3. Extract every product, saving images if enabled
/// 4. Write the records with the configured sink
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(HarvestSummary)` - Output path and run statistics
/// * `Err(HarvestError)` - The run could not start or the sink failed
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::load_config;
/// use catalog_harvest::crawler::harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let summary = harvest(config).await?;
/// println!("{}", summary.output_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Config) -> Result<HarvestSummary> {
    let output_path = config.output.output_path();
    let format = config.output.format;

    let mut coordinator = Coordinator::new(config)?;
    let report = coordinator.run().await?;

    let sink = sink_for(format, &output_path);
    if let Err(e) = sink.write(&report.records) {
        tracing::error!("Failed to write {}: {}", output_path.display(), e);
        return Err(e.into());
    }
    tracing::info!("Wrote {} records to {}", report.records.len(), output_path.display());

    Ok(HarvestSummary {
        output_path,
        statistics: report.statistics,
    })
}
