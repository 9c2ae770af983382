//! Configuration module for Advisor-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use advisor_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawling directory at: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, OutputConfig, PaginationConfig, SiteConfig, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

use crate::ConfigError;
use url::Url;

impl Config {
    /// Parses the configured base URL
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))
    }

    /// Resolves the top-level directory page against the base URL
    pub fn directory_url(&self) -> Result<Url, ConfigError> {
        self.base_url()?.join(&self.site.directory_path).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid directory-path '{}': {}",
                self.site.directory_path, e
            ))
        })
    }
}
