use serde::Deserialize;

/// Browser identity sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// Language preference sent with every request unless overridden
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Main configuration structure for Advisor-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    pub output: OutputConfig,
}

/// The directory being crawled
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme and host of the directory (e.g. "https://www.wiseradvisor.com")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the top-level page listing every region
    #[serde(rename = "directory-path")]
    pub directory_path: String,

    /// First path segment shared by all region, sub-region and listing links
    #[serde(rename = "path-prefix")]
    pub path_prefix: String,
}

/// HTTP identity, timeout and pacing
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            timeout_secs: default_timeout_secs(),
            pacing_ms: default_pacing_ms(),
        }
    }
}

/// Listing pagination limits
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationConfig {
    /// Highest page number requested per sub-region; unbounded when absent
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file receiving the records
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Optional path of a markdown run summary
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_pacing_ms() -> u64 {
    1000
}
