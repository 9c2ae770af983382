//! Markdown run summary generation

use crate::output::stats::CrawlStatistics;
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of a finished crawl
///
/// # Arguments
///
/// * `stats` - The crawl statistics
/// * `csv_path` - Where the records were written, quoted in the summary
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(
    stats: &CrawlStatistics,
    csv_path: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(stats, csv_path);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats crawl statistics as markdown
pub fn format_markdown_summary(stats: &CrawlStatistics, csv_path: &str) -> String {
    let mut md = String::new();

    md.push_str("# Advisor-Harvest Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", stats.started_at.to_rfc3339()));
    if let Some(finished) = &stats.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        stats.elapsed().as_secs_f64()
    ));
    md.push_str(&format!("- **Output**: `{}`\n\n", csv_path));

    md.push_str("## Traversal\n\n");
    md.push_str("| Level | Found | Skipped |\n");
    md.push_str("|-------|-------|---------|\n");
    md.push_str(&format!(
        "| Regions | {} | {} rejected, {} empty |\n",
        stats.regions, stats.regions_rejected, stats.empty_regions
    ));
    md.push_str(&format!(
        "| Sub-regions | {} | {} empty |\n",
        stats.sub_regions, stats.empty_sub_regions
    ));
    md.push_str(&format!(
        "| Listing pages | {} | {} cut at max-pages |\n",
        stats.listing_pages, stats.page_limit_hits
    ));
    md.push_str(&format!("| Listings | {} | - |\n\n", stats.listings));

    md.push_str("## Records\n\n");
    md.push_str(&format!("- **Extracted**: {}\n", stats.records));
    md.push_str(&format!(
        "- **With unavailable fields**: {}\n",
        stats.partial_records
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    md.push_str("## Requests\n\n");
    md.push_str(&format!("- **Issued**: {}\n", stats.requests));
    md.push_str(&format!("- **Failed**: {}\n", stats.fetch_failures));

    md
}
