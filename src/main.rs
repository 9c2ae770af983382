//! Advisor-Harvest main entry point
//!
//! This is the command-line interface for the Advisor-Harvest directory crawler.

use advisor_harvest::config::{load_config_with_hash, Config};
use advisor_harvest::crawler::crawl;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Advisor-Harvest: a directory crawler for advisor contact records
///
/// Walks region, sub-region and listing pages of a business directory and
/// writes one CSV row per listing detail page.
#[derive(Parser, Debug)]
#[command(name = "advisor-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a business directory into a contact CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Write the CSV here instead of the configured csv-path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("advisor_harvest=info,warn"),
            1 => EnvFilter::new("advisor_harvest=debug,info"),
            2 => EnvFilter::new("advisor_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Advisor-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Directory page: {}", config.directory_url()?);
    println!("  Path prefix: /{}/", config.site.path_prefix);

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Accept-Language: {}", config.fetcher.accept_language);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Pacing: {}ms", config.fetcher.pacing_ms);

    println!("\nPagination:");
    match config.pagination.max_pages {
        Some(max) => println!("  Max pages per sub-region: {}", max),
        None => println!("  Max pages per sub-region: unbounded"),
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting crawl at {}", config.directory_url()?);

    match crawl(config).await {
        Ok(outcome) => {
            tracing::info!(
                "Crawl finished with {} records",
                outcome.records.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
