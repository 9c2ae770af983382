//! Per-host request pacing
//!
//! Successive requests to the same host are spaced by at least the configured
//! interval. The crawl is sequential, so pacing is a plain wait before each
//! request rather than a queue.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;

/// Tracks the last request time of every host
#[derive(Debug, Clone)]
pub struct Pacer {
    min_interval: Duration,
    last_request: HashMap<String, Instant>,
    request_count: u64,
}

impl Pacer {
    /// Creates a pacer enforcing `min_interval` between requests to one host
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: HashMap::new(),
            request_count: 0,
        }
    }

    /// Total requests recorded across all hosts
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Returns how long to wait before `host` may be requested again
    ///
    /// Returns None if a request can be made now.
    pub fn time_until_next_request(&self, host: &str, now: Instant) -> Option<Duration> {
        let last = self.last_request.get(host)?;
        let elapsed = now.duration_since(*last);
        if elapsed >= self.min_interval {
            None
        } else {
            Some(self.min_interval - elapsed)
        }
    }

    /// Records that a request was made to `host`
    pub fn record_request(&mut self, host: &str, now: Instant) {
        self.last_request.insert(host.to_string(), now);
        self.request_count += 1;
    }

    /// Waits until `url`'s host may be requested, then records the request
    pub async fn wait_turn(&mut self, url: &Url) {
        let host = host_key(url);
        if let Some(wait) = self.time_until_next_request(&host, Instant::now()) {
            tracing::trace!("Pacing {} for {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }
        self.record_request(&host, Instant::now());
    }
}

/// Host and port identifying a pacing bucket
pub fn host_key(url: &Url) -> String {
    match (url.host_str(), url.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{}:{}", host.to_lowercase(), port),
        (Some(host), None) => host.to_lowercase(),
        _ => String::new(),
    }
}
