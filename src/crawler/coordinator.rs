//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl is a strictly sequential tree walk:
//!
//! ```text
//! directory page ─► regions ─► sub-regions ─► listing pages ─► detail pages
//! ```
//!
//! Each level is processed in discovery order. A node that yields nothing
//! (failed fetch, no children) is logged and skipped; only an empty region set
//! stops the run.

use crate::config::Config;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::paginator::{Paginator, StopReason};
use crate::crawler::parser::parse_page;
use crate::extract::{AdvisorRecord, RecordExtractor};
use crate::links::{LinkClassifier, LinkShape};
use crate::output::{generate_markdown_summary, print_statistics, CrawlStatistics, CsvOutput, RecordSink, WriteStatus};
use crate::region::canonical_region_name;
use crate::HarvestError;
use std::path::Path;
use url::Url;

/// A validated top-level region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRef {
    /// Canonical region name ("New York")
    pub name: String,
    pub url: Url,
}

/// A sub-region belonging to one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRegionRef {
    pub region: String,
    pub name: String,
    pub url: Url,
}

/// Records and statistics of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Records in listing discovery order
    pub records: Vec<AdvisorRecord>,
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    directory_url: Url,
    fetcher: Fetcher,
    classifier: LinkClassifier,
    extractor: RecordExtractor,
    max_pages: Option<u32>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Invalid site URLs or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let base_url = config.base_url()?;
        let directory_url = config.directory_url()?;

        Ok(Self {
            directory_url,
            fetcher: Fetcher::new(&config.fetcher)?,
            classifier: LinkClassifier::new(base_url, &config.site.path_prefix),
            extractor: RecordExtractor::new()?,
            max_pages: config.pagination.max_pages,
        })
    }

    /// Runs the full traversal and returns the accumulated records
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - Traversal finished, possibly with zero records
    /// * `Err(HarvestError::NoRegions)` - The directory page yielded no valid region
    pub async fn run(&mut self) -> Result<CrawlOutcome, HarvestError> {
        let mut stats = CrawlStatistics::start();
        let mut records = Vec::new();

        let regions = self.enumerate_regions(&mut stats).await;
        tracing::info!("Found {} regions.", regions.len());

        if regions.is_empty() {
            tracing::error!("No regions found at {}. Stopping.", self.directory_url);
            return Err(HarvestError::NoRegions {
                url: self.directory_url.to_string(),
            });
        }

        for region in &regions {
            tracing::info!("Processing region: {} - URL: {}", region.name, region.url);
            self.crawl_region(region, &mut records, &mut stats).await;
        }

        stats.requests = self.fetcher.requests_made();
        stats.fetch_failures = self.fetcher.failures();
        stats.finish();

        tracing::info!(
            "Crawl completed: {} records from {} listings in {:?}",
            records.len(),
            stats.listings,
            stats.elapsed()
        );

        Ok(CrawlOutcome { records, stats })
    }

    /// Reads the directory page and keeps the links naming a known region
    async fn enumerate_regions(&mut self, stats: &mut CrawlStatistics) -> Vec<RegionRef> {
        let url = self.directory_url.clone();
        let Some(body) = self.fetcher.fetch(&url).await.into_body() else {
            return Vec::new();
        };

        let parsed = parse_page(&body, &url);
        let candidates = self.classifier.classify(&parsed.links, LinkShape::Region, None);
        tracing::info!("Total potential region links found: {}", candidates.len());

        let mut regions: Vec<RegionRef> = Vec::new();
        for candidate in candidates {
            match canonical_region_name(&candidate.name) {
                Some(name) if regions.iter().any(|r| r.name == name) => {
                    tracing::debug!("Region {} already listed; skipping {}", name, candidate.url);
                }
                Some(name) => {
                    tracing::debug!("Found region: {} - URL: {}", name, candidate.url);
                    regions.push(RegionRef {
                        name: name.to_string(),
                        url: candidate.url,
                    });
                }
                None => {
                    stats.regions_rejected += 1;
                    tracing::warn!(
                        "Unrecognized region name: '{}'. Skipping this link.",
                        candidate.name
                    );
                }
            }
        }

        stats.regions = regions.len() as u64;
        regions
    }

    async fn crawl_region(
        &mut self,
        region: &RegionRef,
        records: &mut Vec<AdvisorRecord>,
        stats: &mut CrawlStatistics,
    ) {
        let sub_regions = self.enumerate_sub_regions(region).await;
        tracing::info!("Found {} sub-regions in {}.", sub_regions.len(), region.name);

        if sub_regions.is_empty() {
            stats.empty_regions += 1;
            tracing::warn!("No sub-regions found for region: {}. Skipping.", region.name);
            return;
        }
        stats.sub_regions += sub_regions.len() as u64;

        for sub_region in &sub_regions {
            tracing::info!(
                "Processing sub-region: {}, {} - URL: {}",
                sub_region.name,
                sub_region.region,
                sub_region.url
            );
            self.crawl_sub_region(sub_region, records, stats).await;
        }
    }

    async fn enumerate_sub_regions(&mut self, region: &RegionRef) -> Vec<SubRegionRef> {
        let Some(body) = self.fetcher.fetch(&region.url).await.into_body() else {
            return Vec::new();
        };

        let parsed = parse_page(&body, &region.url);
        self.classifier
            .classify(&parsed.links, LinkShape::SubRegion, Some(&region.name))
            .into_iter()
            .map(|link| SubRegionRef {
                region: region.name.clone(),
                name: link.name,
                url: link.url,
            })
            .collect()
    }

    async fn crawl_sub_region(
        &mut self,
        sub_region: &SubRegionRef,
        records: &mut Vec<AdvisorRecord>,
        stats: &mut CrawlStatistics,
    ) {
        let paginator = Paginator::new(&self.classifier, self.max_pages);
        let pagination = paginator
            .enumerate_listings(&mut self.fetcher, &sub_region.url)
            .await;

        stats.listing_pages += u64::from(pagination.pages_fetched);
        if pagination.stop == StopReason::PageLimit {
            stats.page_limit_hits += 1;
        }

        tracing::info!(
            "Found {} listings in {}, {}.",
            pagination.listings.len(),
            sub_region.name,
            sub_region.region
        );

        if pagination.listings.is_empty() {
            stats.empty_sub_regions += 1;
            tracing::warn!(
                "No listings found for sub-region: {}, {}. Skipping.",
                sub_region.name,
                sub_region.region
            );
            return;
        }
        stats.listings += pagination.listings.len() as u64;

        for listing in &pagination.listings {
            match self.harvest_listing(listing).await {
                Some(record) => {
                    stats.record_added(&record);
                    records.push(record);
                }
                None => {
                    tracing::warn!("Failed to extract data for listing: {}", listing);
                }
            }
        }
    }

    /// Fetches one detail page and extracts its record
    async fn harvest_listing(&mut self, url: &Url) -> Option<AdvisorRecord> {
        let body = self.fetcher.fetch(url).await.into_body()?;
        let record = self.extractor.extract(&body);
        tracing::debug!("Extracted record for {}: {:?}", url, record);
        Some(record)
    }
}

/// Runs a complete crawl and writes its output
///
/// Output failures are logged and do not fail the run.
///
/// # Example
///
/// ```no_run
/// use advisor_harvest::config::load_config;
/// use advisor_harvest::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let outcome = run_crawl(&config).await?;
/// println!("{} records", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    let outcome = coordinator.run().await?;

    let sink = CsvOutput::new(&config.output.csv_path);
    match sink.write_records(&outcome.records) {
        Ok(WriteStatus::Written { path, rows }) => {
            tracing::info!("Successfully wrote {} records to {}.", rows, path.display());
        }
        Ok(WriteStatus::Skipped) => {}
        Err(e) => {
            tracing::error!("Error writing CSV file {}: {}", config.output.csv_path, e);
        }
    }

    if let Some(summary_path) = &config.output.summary_path {
        match generate_markdown_summary(&outcome.stats, &config.output.csv_path, Path::new(summary_path)) {
            Ok(()) => tracing::info!("Run summary written to {}", summary_path),
            Err(e) => tracing::error!("Error writing run summary {}: {}", summary_path, e),
        }
    }

    print_statistics(&outcome.stats);
    Ok(outcome)
}
