//! In-memory `PageFetcher` used by unit tests

use crate::crawler::fetcher::PageFetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use url::Url;

/// In-memory site: URL -> markup or bytes, with a log of every fetch
#[derive(Default)]
pub(crate) struct FakeSite {
    pages: HashMap<String, String>,
    assets: HashMap<String, Vec<u8>>,
    pub(crate) fetched: Vec<String>,
}

impl FakeSite {
    pub(crate) fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub(crate) fn asset(mut self, url: &str, bytes: &[u8]) -> Self {
        self.assets.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub(crate) fn fetch_count(&self, url: &str) -> usize {
        self.fetched.iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch_page(&mut self, url: &Url) -> Option<String> {
        self.fetched.push(url.to_string());
        self.pages.get(url.as_str()).cloned()
    }

    async fn fetch_bytes(&mut self, url: &Url) -> Option<Vec<u8>> {
        self.fetched.push(url.to_string());
        self.assets.get(url.as_str()).cloned()
    }
}
