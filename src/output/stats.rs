//! Crawl statistics
//!
//! Counters collected by the coordinator while it walks the directory, plus
//! a console report printed at the end of a run.

use crate::extract::AdvisorRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Valid regions found on the directory page
    pub regions: u64,

    /// Region-shaped links whose name is not a known region
    pub regions_rejected: u64,

    /// Regions that yielded no sub-regions
    pub empty_regions: u64,

    pub sub_regions: u64,

    /// Sub-regions that yielded no listings
    pub empty_sub_regions: u64,

    /// Listing pages requested across all sub-regions
    pub listing_pages: u64,

    /// Sub-regions cut short by `max-pages`
    pub page_limit_hits: u64,

    /// Detail page URLs discovered
    pub listings: u64,

    pub records: u64,

    /// Records with at least one unavailable field
    pub partial_records: u64,

    /// Unavailable fields across all records
    pub missing_fields: u64,

    /// HTTP requests issued
    pub requests: u64,

    /// Requests that did not produce a page
    pub fetch_failures: u64,
}

impl CrawlStatistics {
    /// Starts a new statistics record stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            regions: 0,
            regions_rejected: 0,
            empty_regions: 0,
            sub_regions: 0,
            empty_sub_regions: 0,
            listing_pages: 0,
            page_limit_hits: 0,
            listings: 0,
            records: 0,
            partial_records: 0,
            missing_fields: 0,
            requests: 0,
            fetch_failures: 0,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Counts an accumulated record
    ///
    /// First and last name are never published, so they are excluded when
    /// deciding whether a record is partial.
    pub fn record_added(&mut self, record: &AdvisorRecord) {
        self.records += 1;
        let missing = record.missing_fields() as u64;
        self.missing_fields += missing;

        let unpublished = u64::from(record.first_name.is_none()) + u64::from(record.last_name.is_none());
        if missing > unpublished {
            self.partial_records += 1;
        }
    }

    /// Run time so far, or total run time once finished
    pub fn elapsed(&self) -> Duration {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).to_std().unwrap_or_default()
    }

    /// Share of discovered listings that produced a record
    pub fn success_rate(&self) -> f64 {
        if self.listings == 0 {
            return 0.0;
        }
        (self.records as f64 / self.listings as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Traversal:");
    println!(
        "  Regions: {} ({} rejected, {} without sub-regions)",
        stats.regions, stats.regions_rejected, stats.empty_regions
    );
    println!(
        "  Sub-regions: {} ({} without listings)",
        stats.sub_regions, stats.empty_sub_regions
    );
    println!("  Listing pages fetched: {}", stats.listing_pages);
    if stats.page_limit_hits > 0 {
        println!("  Sub-regions cut at max-pages: {}", stats.page_limit_hits);
    }
    println!("  Listings discovered: {}", stats.listings);
    println!();

    println!("Requests:");
    println!("  Issued: {}", stats.requests);
    println!("  Failed: {}", stats.fetch_failures);
    println!();

    println!("Records:");
    println!("  Extracted: {}", stats.records);
    println!("  With unavailable fields: {}", stats.partial_records);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} listings produced a record)",
        stats.success_rate(),
        stats.records,
        stats.listings
    );
    println!("Elapsed: {:.1}s", stats.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics_are_zero() {
        let stats = CrawlStatistics::start();
        assert_eq!(stats.records, 0);
        assert_eq!(stats.finished_at, None);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_record_added_counts_partial_records() {
        let mut stats = CrawlStatistics::start();

        let complete = AdvisorRecord {
            company: Some("Acme".to_string()),
            street: Some("1 Main".to_string()),
            street2: Some("Suite 2".to_string()),
            city: Some("Dover".to_string()),
            state: Some("DE".to_string()),
            zip: Some("19901".to_string()),
            phone: Some("555".to_string()),
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        stats.record_added(&complete);
        stats.record_added(&AdvisorRecord::default());

        assert_eq!(stats.records, 2);
        assert_eq!(stats.partial_records, 1);
        assert_eq!(stats.missing_fields, 12);
    }

    #[test]
    fn test_success_rate() {
        let mut stats = CrawlStatistics::start();
        stats.listings = 4;
        stats.records = 3;
        assert!((stats.success_rate() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_finish_sets_timestamp() {
        let mut stats = CrawlStatistics::start();
        stats.finish();
        assert!(stats.finished_at.unwrap() >= stats.started_at);
    }
}
