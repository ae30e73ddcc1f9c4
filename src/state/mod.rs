//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `CrawlState`: visited listing pages, the BFS frontier and the discovered product URLs
//! - `ItemOutcome`: how each product URL ended up in the record set

mod crawl_state;
mod item_outcome;

// Re-export main types
pub use crawl_state::CrawlState;
pub use item_outcome::ItemOutcome;
