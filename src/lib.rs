//! Advisor-Harvest: a directory crawler for advisor contact records
//!
//! This crate walks a hierarchical, paginated business directory
//! (region → sub-region → listing → detail page), extracts a normalized
//! contact record from every detail page, and writes the records as CSV.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod links;
pub mod output;
pub mod region;

use thiserror::Error;

/// Main error type for Advisor-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Extractor setup error: {0}")]
    Extractor(String),

    #[error("No regions found on directory page {url}")]
    NoRegions { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Advisor-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{AdvisorRecord, RecordExtractor, NOT_AVAILABLE};
pub use links::{LinkClassifier, LinkShape, NamedLink};
pub use region::{canonical_region_name, is_valid_region};
