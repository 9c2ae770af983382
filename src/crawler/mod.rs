//! Crawler module for directory traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with per-host pacing
//! - HTML parsing and link extraction
//! - Listing pagination
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod pacer;
mod paginator;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, RegionRef, SubRegionRef};
pub use fetcher::{build_http_client, fetch_url, FailureKind, FetchResult, Fetcher};
pub use pacer::{host_key, Pacer};
pub use paginator::{page_url, Pagination, Paginator, StopReason};
pub use parser::{parse_page, ParsedPage};

use crate::config::Config;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client, classifier and extractor
/// 2. Enumerate and validate regions
/// 3. Enumerate sub-regions per region
/// 4. Paginate listings per sub-region
/// 5. Extract one record per listing
/// 6. Write the CSV (and optional summary)
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed, with or without records
/// * `Err(HarvestError)` - Setup failed or no region was found
pub async fn crawl(config: &Config) -> crate::Result<CrawlOutcome> {
    run_crawl(config).await
}
