//! Crawler module for page fetching and pipeline orchestration
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - Randomized per-request throttling
//! - Listing page parsing and breadth-first product discovery
//! - Overall harvest coordination

mod coordinator;
mod fetcher;
mod frontier;
mod listing;
mod throttle;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{harvest, Coordinator, HarvestReport, HarvestSummary};
pub use fetcher::{
    build_http_client, fetch_binary, fetch_url, pick_user_agent, FetchResult, HttpFetcher,
    PageFetcher,
};
pub use frontier::{discover, CrawlFrontier, DiscoveryStats};
pub use listing::{parse_listing, ListingPage, ListingParser, DEFAULT_PRODUCT_PATH_MARKER};
pub use throttle::RequestThrottle;
