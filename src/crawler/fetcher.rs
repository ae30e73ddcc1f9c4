//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with a browser-like request identity
//! - GET requests for listing and product markup
//! - GET requests for image bytes
//! - Error classification
//!
//! Transport failures never escape as errors: at the `PageFetcher` seam they
//! become `None`, meaning "no data from this URL".

use crate::config::{Config, UserAgentConfig};
use crate::crawler::throttle::RequestThrottle;
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Accept header sent with every request
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch, None otherwise
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Source of page markup and binary assets
///
/// The crawl frontier, the coordinator and the image store only talk to the
/// network through this trait. Failures are reported as `None`.
#[async_trait]
pub trait PageFetcher: Send {
    /// Fetches the markup of a page
    async fn fetch_page(&mut self, url: &Url) -> Option<String>;

    /// Fetches the raw bytes of an asset (e.g. a product image)
    async fn fetch_bytes(&mut self, url: &Url) -> Option<Vec<u8>>;
}

/// Picks one user-agent string from the configured pool
pub fn pick_user_agent(config: &UserAgentConfig) -> &str {
    match config.agents.len() {
        0 => "",
        1 => &config.agents[0],
        n => &config.agents[rand::random_range(0..n)],
    }
}

/// Builds an HTTP client presenting a browser-like identity
///
/// # Arguments
///
/// * `config` - The user agent configuration (Accept-Language)
/// * `user_agent` - The user-agent string for this run
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::UserAgentConfig;
/// use catalog_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     agents: vec!["Mozilla/5.0 (X11; Linux x86_64) Chrome/119.0.0.0 Safari/537.36".to_string()],
///     accept_language: "pt-BR,pt;q=0.9".to_string(),
/// };
///
/// let client = build_http_client(&config, &config.agents[0], Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    match HeaderValue::from_str(&config.accept_language) {
        Ok(value) => {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Err(_) => {
            tracing::warn!(
                "Ignoring invalid accept-language value: {:?}",
                config.accept_language
            );
        }
    }

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// No retries: a timeout is a permanent failure for that URL.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    content_type,
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Downloads the raw bytes behind a URL
pub async fn fetch_binary(client: &Client, url: &str) -> Result<Vec<u8>, HarvestError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let bytes = response.bytes().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(bytes.to_vec())
}

/// `PageFetcher` backed by a real HTTP client and a request throttle
pub struct HttpFetcher {
    client: Client,
    throttle: RequestThrottle,
    user_agent: String,
}

impl HttpFetcher {
    /// Creates a fetcher from an existing client and throttle
    pub fn new(client: Client, throttle: RequestThrottle, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            throttle,
            user_agent: user_agent.into(),
        }
    }

    /// Creates a fetcher from the configuration, picking this run's user agent
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let user_agent = pick_user_agent(&config.user_agent).to_string();
        let client = build_http_client(
            &config.user_agent,
            &user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        let throttle = RequestThrottle::from_config(&config.crawler);

        Ok(Self::new(client, throttle, user_agent))
    }

    /// The user-agent string presented by this fetcher
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&mut self, url: &Url) -> Option<String> {
        let result = fetch_url(&self.client, url.as_str()).await;
        self.throttle.pause().await;

        match result {
            FetchResult::Success {
                final_url,
                status_code,
                content_type,
                body,
            } => {
                tracing::debug!(
                    "Fetched {} ({} {}, {} bytes)",
                    final_url,
                    status_code,
                    content_type,
                    body.len()
                );
                Some(body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                None
            }
        }
    }

    async fn fetch_bytes(&mut self, url: &Url) -> Option<Vec<u8>> {
        let result = fetch_binary(&self.client, url.as_str()).await;
        self.throttle.pause().await;

        match result {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}
