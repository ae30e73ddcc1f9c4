//! Run statistics
//!
//! Counters collected while a harvest runs, printed once at the end.

use crate::crawler::DiscoveryStats;
use crate::state::ItemOutcome;
use crate::storage::SavedImages;
use chrono::{DateTime, Utc};

/// Harvest statistics summary
#[derive(Debug, Clone)]
pub struct HarvestStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, if it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages fetched successfully
    pub listing_pages_fetched: u64,

    /// Listing pages whose fetch failed
    pub listing_pages_failed: u64,

    /// Unique product URLs discovered
    pub products_discovered: u64,

    /// Products with an extracted record
    pub products_extracted: u64,

    /// Products whose page could not be fetched
    pub products_unreachable: u64,

    /// Products whose processing failed after the fetch
    pub products_failed: u64,

    /// Images fetched during the run
    pub images_downloaded: u64,

    /// Images already present on disk
    pub images_reused: u64,

    /// Images skipped after an error
    pub images_failed: u64,
}

impl Default for HarvestStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl HarvestStatistics {
    /// Starts a new statistics record stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            listing_pages_fetched: 0,
            listing_pages_failed: 0,
            products_discovered: 0,
            products_extracted: 0,
            products_unreachable: 0,
            products_failed: 0,
            images_downloaded: 0,
            images_reused: 0,
            images_failed: 0,
        }
    }

    /// Adds the counters of the discovery phase
    pub fn record_discovery(&mut self, stats: DiscoveryStats, products_discovered: usize) {
        self.listing_pages_fetched += stats.listing_pages_fetched;
        self.listing_pages_failed += stats.listing_pages_failed;
        self.products_discovered += products_discovered as u64;
    }

    /// Counts the outcome of one product
    pub fn record_outcome(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Extracted => self.products_extracted += 1,
            ItemOutcome::Unreachable => self.products_unreachable += 1,
            ItemOutcome::Failed => self.products_failed += 1,
        }
    }

    /// Adds the image counters of one product
    pub fn record_images(&mut self, saved: &SavedImages) {
        self.images_downloaded += saved.downloaded as u64;
        self.images_reused += saved.reused as u64;
        self.images_failed += saved.failed as u64;
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of placeholder records emitted
    pub fn placeholders(&self) -> u64 {
        self.products_unreachable + self.products_failed
    }

    /// Duration of the run in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Returns the extraction success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let processed = self.products_extracted + self.placeholders();
        if processed == 0 {
            return 0.0;
        }
        (self.products_extracted as f64 / processed as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {} seconds ({:.2} minutes)", duration, duration as f64 / 60.0);
    }
    println!();

    println!("Discovery:");
    println!("  Listing pages fetched: {}", stats.listing_pages_fetched);
    println!("  Listing pages failed: {}", stats.listing_pages_failed);
    println!("  Products discovered: {}", stats.products_discovered);
    println!();

    println!("Products:");
    println!("  {}: {}", ItemOutcome::Extracted, stats.products_extracted);
    println!("  {}: {}", ItemOutcome::Unreachable, stats.products_unreachable);
    println!("  {}: {}", ItemOutcome::Failed, stats.products_failed);
    println!();

    if stats.images_downloaded + stats.images_reused + stats.images_failed > 0 {
        println!("Images:");
        println!("  Downloaded: {}", stats.images_downloaded);
        println!("  Already present: {}", stats.images_reused);
        println!("  Skipped after error: {}", stats.images_failed);
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} products extracted)",
        stats.success_rate(),
        stats.products_extracted,
        stats.products_extracted + stats.placeholders()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_counters() {
        let mut stats = HarvestStatistics::new();
        stats.record_outcome(ItemOutcome::Extracted);
        stats.record_outcome(ItemOutcome::Extracted);
        stats.record_outcome(ItemOutcome::Extracted);
        stats.record_outcome(ItemOutcome::Unreachable);

        assert_eq!(stats.products_extracted, 3);
        assert_eq!(stats.placeholders(), 1);
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_no_products() {
        assert_eq!(HarvestStatistics::new().success_rate(), 0.0);
    }

    #[test]
    fn test_discovery_and_images() {
        let mut stats = HarvestStatistics::new();
        stats.record_discovery(
            DiscoveryStats {
                listing_pages_fetched: 2,
                listing_pages_failed: 1,
                cycles_broken: 0,
            },
            5,
        );
        stats.record_images(&SavedImages {
            references: vec![],
            downloaded: 2,
            reused: 1,
            failed: 1,
        });

        assert_eq!(stats.listing_pages_fetched, 2);
        assert_eq!(stats.listing_pages_failed, 1);
        assert_eq!(stats.products_discovered, 5);
        assert_eq!(stats.images_downloaded, 2);
        assert_eq!(stats.images_failed, 1);
    }

    #[test]
    fn test_duration_after_finish() {
        let mut stats = HarvestStatistics::new();
        assert!(stats.duration_seconds().is_none());
        stats.finish();
        assert!(stats.duration_seconds().unwrap() >= 0);
    }
}
