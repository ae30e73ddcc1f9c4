//! Crawl frontier
//!
//! Breadth-first traversal of listing pages. Starting from the configured
//! start URLs, each listing page is fetched once, its product links are
//! merged into the discovered set, and its next-page link (if unvisited) is
//! appended to the frontier tail. Traversal ends when the frontier is empty.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::listing::ListingParser;
use crate::state::CrawlState;
use url::Url;

/// Counters describing one discovery run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Listing pages that were fetched successfully
    pub listing_pages_fetched: u64,

    /// Listing pages whose fetch failed
    pub listing_pages_failed: u64,

    /// Next-page links dropped because they pointed to a visited page
    pub cycles_broken: u64,
}

/// BFS driver over listing pages
pub struct CrawlFrontier {
    state: CrawlState,
    parser: ListingParser,
    stats: DiscoveryStats,
}

impl CrawlFrontier {
    /// Creates a frontier seeded with the start URLs
    pub fn new<I>(start_urls: I, parser: ListingParser) -> Self
    where
        I: IntoIterator<Item = Url>,
    {
        Self {
            state: CrawlState::new(start_urls),
            parser,
            stats: DiscoveryStats::default(),
        }
    }

    /// Runs the traversal to exhaustion and returns the discovered product
    /// URLs, deduplicated and sorted
    pub async fn discover<F>(mut self, fetcher: &mut F) -> (Vec<Url>, DiscoveryStats)
    where
        F: PageFetcher + ?Sized,
    {
        while let Some(listing_url) = self.state.next_listing() {
            self.visit(fetcher, listing_url).await;
        }

        tracing::info!(
            "Discovery finished: {} listing pages visited, {} products found",
            self.state.visited_count(),
            self.state.discovered_count()
        );

        let stats = self.stats;
        (self.state.into_sorted_products(), stats)
    }

    /// Processes one listing page
    async fn visit<F>(&mut self, fetcher: &mut F, listing_url: Url)
    where
        F: PageFetcher + ?Sized,
    {
        tracing::info!("Processing listing page {}", listing_url);

        let Some(html) = fetcher.fetch_page(&listing_url).await else {
            tracing::warn!("Skipping listing page {}: no content", listing_url);
            self.stats.listing_pages_failed += 1;
            return;
        };
        self.stats.listing_pages_fetched += 1;

        let page = self.parser.parse(&html, &listing_url);
        let found = page.product_links.len();
        let new = self.state.record_products(page.product_links);
        tracing::debug!(
            "{}: {} product links ({} new), {} discovered so far",
            listing_url,
            found,
            new,
            self.state.discovered_count()
        );

        if let Some(next_url) = page.next_url {
            if !self.state.enqueue_listing(next_url.clone()) {
                tracing::debug!("Dropping next link to visited page {}", next_url);
                self.stats.cycles_broken += 1;
            }
        }
    }
}

/// Discovers product URLs from the start URLs using the default parser
pub async fn discover<F>(start_urls: Vec<Url>, fetcher: &mut F) -> Vec<Url>
where
    F: PageFetcher + ?Sized,
{
    CrawlFrontier::new(start_urls, ListingParser::default())
        .discover(fetcher)
        .await
        .0
}
