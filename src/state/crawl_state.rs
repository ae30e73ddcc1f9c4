use std::collections::{BTreeSet, HashSet, VecDeque};
use url::Url;

/// Process-local state of one discovery run
///
/// Owns the listing-page frontier, the set of listing pages already visited
/// and the set of product URLs discovered so far.
///
/// Invariants:
/// - a listing page is processed at most once; the visited check happens at
///   dequeue time, so duplicate enqueues are tolerated and skipped
/// - `discovered` only grows
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    visited: HashSet<Url>,
    frontier: VecDeque<Url>,
    discovered: BTreeSet<Url>,
}

impl CrawlState {
    /// Creates a state whose frontier holds the given start URLs in order
    pub fn new<I>(start_urls: I) -> Self
    where
        I: IntoIterator<Item = Url>,
    {
        Self {
            visited: HashSet::new(),
            frontier: start_urls.into_iter().collect(),
            discovered: BTreeSet::new(),
        }
    }

    /// Pops the next listing page that has not been visited yet and marks it
    /// visited
    ///
    /// Already-visited entries at the head of the frontier are discarded.
    /// Returns None once the frontier is exhausted.
    pub fn next_listing(&mut self) -> Option<Url> {
        while let Some(url) = self.frontier.pop_front() {
            if self.visited.contains(&url) {
                tracing::trace!("Skipping already visited listing page {}", url);
                continue;
            }
            self.visited.insert(url.clone());
            return Some(url);
        }
        None
    }

    /// Appends a next-page link to the frontier tail unless it was visited
    ///
    /// Returns false when the link was dropped because it points back to a
    /// visited page.
    pub fn enqueue_listing(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.frontier.push_back(url);
        true
    }

    /// Adds product links to the discovered set, returning how many were new
    pub fn record_products<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        links
            .into_iter()
            .filter(|link| self.discovered.insert(link.clone()))
            .count()
    }

    /// Returns true if the listing page was already visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Number of listing pages visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of listing pages waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Number of distinct product URLs discovered so far
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Consumes the state, returning the discovered product URLs sorted by
    /// their string form
    pub fn into_sorted_products(self) -> Vec<Url> {
        self.discovered.into_iter().collect()
    }
}
