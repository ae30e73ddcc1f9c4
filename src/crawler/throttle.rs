//! Request pacing
//!
//! Every network fetch is followed by a mandatory pause so the catalog site
//! never sees more than one request per pause interval. The pause is either
//! fixed (equal bounds) or drawn uniformly from `[min, max]`.

use crate::config::CrawlerConfig;
use std::time::Duration;

/// Mandatory pause applied after each request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestThrottle {
    min_delay: Duration,
    max_delay: Duration,
}

impl RequestThrottle {
    /// Creates a throttle with the given bounds; inverted bounds are swapped
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        if max_delay < min_delay {
            Self {
                min_delay: max_delay,
                max_delay: min_delay,
            }
        } else {
            Self {
                min_delay,
                max_delay,
            }
        }
    }

    /// Creates a throttle with a fixed pause
    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    /// Creates a throttle from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.effective_max_delay_ms()),
        )
    }

    /// Returns the duration of the next pause
    pub fn next_delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }

        let min_ms = self.min_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::random_range(min_ms..=max_ms))
    }

    /// Sleeps for the next pause
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::trace!("Pausing {:?} before the next request", delay);
            tokio::time::sleep(delay).await;
        }
    }

    /// Lower bound of the pause
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Upper bound of the pause
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}
