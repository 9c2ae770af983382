//! Output module for crawl results
//!
//! This module handles:
//! - Writing accumulated records as CSV
//! - Recording crawl statistics
//! - Generating a markdown run summary

mod csv_output;
mod markdown;
pub mod stats;
mod traits;

pub use csv_output::CsvOutput;
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, RecordSink, WriteStatus};
