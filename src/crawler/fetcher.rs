//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured browser identity
//! - GET requests with a bounded timeout
//! - Per-host pacing between requests
//! - Failure classification
//!
//! A failed fetch is never retried; callers abandon that page and continue
//! with its siblings.

use crate::config::FetcherConfig;
use crate::crawler::pacer::Pacer;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Transport failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request exceeded the configured timeout
    Timeout,
    /// The host could not be reached
    Connect,
    /// The response body could not be read
    Body,
    /// Anything else reported by the client
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connection error",
            FailureKind::Body => "body read error",
            FailureKind::Other => "request error",
        };
        f.write_str(label)
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Failure category
        kind: FailureKind,
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// The body on success, `None` for every failure
    pub fn into_body(self) -> Option<String> {
        match self {
            FetchResult::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Short description of a failure, `None` on success
    pub fn failure(&self) -> Option<String> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            FetchResult::NetworkError { kind, error } => Some(format!("{}: {}", kind, error)),
        }
    }
}

/// Builds an HTTP client with the configured identity and timeout
///
/// # Example
///
/// ```
/// use advisor_harvest::config::FetcherConfig;
/// use advisor_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    } else {
        tracing::warn!(
            "Ignoring invalid accept-language header value: {}",
            config.accept_language
        );
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a single GET and classifies the outcome
///
/// | Condition                 | Result                      |
/// |---------------------------|-----------------------------|
/// | 2xx and readable body     | `Success`                   |
/// | Any other status          | `HttpError`                 |
/// | Timeout                   | `NetworkError { Timeout }`  |
/// | Connection refused, DNS   | `NetworkError { Connect }`  |
/// | Body read failure         | `NetworkError { Body }`     |
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

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    kind: if e.is_timeout() {
                        FailureKind::Timeout
                    } else {
                        FailureKind::Body
                    },
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            let kind = if e.is_timeout() {
                FailureKind::Timeout
            } else if e.is_connect() {
                FailureKind::Connect
            } else {
                FailureKind::Other
            };
            FetchResult::NetworkError {
                kind,
                error: e.to_string(),
            }
        }
    }
}

/// Paced fetcher shared by every stage of the crawl
pub struct Fetcher {
    client: Client,
    pacer: Pacer,
    failures: u64,
}

impl Fetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            pacer: Pacer::new(Duration::from_millis(config.pacing_ms)),
            failures: 0,
        })
    }

    /// Waits for the host's pacing slot, then fetches `url`
    ///
    /// Every attempt and its outcome is logged here; callers only decide what
    /// to skip.
    pub async fn fetch(&mut self, url: &Url) -> FetchResult {
        self.pacer.wait_turn(url).await;
        tracing::debug!("GET {}", url);

        let result = fetch_url(&self.client, url.as_str()).await;
        match &result {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if final_url.as_str() != url.as_str() {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                tracing::info!(
                    "Retrieved {} (HTTP {}, {} bytes)",
                    url,
                    status_code,
                    body.len()
                );
            }
            failed => {
                self.failures += 1;
                tracing::error!(
                    "Error fetching {}: {}",
                    url,
                    failed.failure().unwrap_or_default()
                );
            }
        }
        result
    }

    /// Requests issued so far
    pub fn requests_made(&self) -> u64 {
        self.pacer.request_count()
    }

    /// Requests that did not produce a page
    pub fn failures(&self) -> u64 {
        self.failures
    }
}
