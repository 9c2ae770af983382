//! Listing pagination
//!
//! A sub-region's listings are spread over `?page=N` pages. The paginator
//! walks them with a single cursor starting at 1 and stops on the first of:
//! a failed fetch, a page without listing links, a page without a "next"
//! control, or the optional page ceiling.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_page;
use crate::links::{LinkClassifier, LinkShape};
use std::collections::HashSet;
use url::Url;

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page could not be fetched; earlier pages are kept
    FetchFailed,
    /// A page had no listing links
    EmptyPage,
    /// A page had listings but no "next" control
    NoNextControl,
    /// The configured `max-pages` was reached
    PageLimit,
}

/// Listings collected from one sub-region
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Detail page URLs, unique, in discovery order
    pub listings: Vec<Url>,

    /// Pages requested, including a failed last one
    pub pages_fetched: u32,

    pub stop: StopReason,
}

/// Returns `url` with its `page` query parameter set to `page`
///
/// Other query parameters are preserved.
pub fn page_url(url: &Url, page: u32) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut paged = url.clone();
    paged
        .query_pairs_mut()
        .clear()
        .extend_pairs(retained.iter())
        .append_pair("page", &page.to_string());
    paged
}

/// Walks a sub-region's listing pages
pub struct Paginator<'a> {
    classifier: &'a LinkClassifier,
    max_pages: Option<u32>,
}

impl<'a> Paginator<'a> {
    pub fn new(classifier: &'a LinkClassifier, max_pages: Option<u32>) -> Self {
        Self {
            classifier,
            max_pages,
        }
    }

    /// Collects every listing URL reachable from `sub_region_url`
    ///
    /// Never fails: a fetch failure ends pagination with whatever was already
    /// collected.
    pub async fn enumerate_listings(&self, fetcher: &mut Fetcher, sub_region_url: &Url) -> Pagination {
        let mut seen = HashSet::new();
        let mut listings = Vec::new();
        let mut page = 1u32;

        let stop = loop {
            if let Some(max) = self.max_pages {
                if page > max {
                    tracing::warn!(
                        "Reached max-pages ({}) for {}; remaining pages not requested",
                        max,
                        sub_region_url
                    );
                    break StopReason::PageLimit;
                }
            }

            let paged = page_url(sub_region_url, page);
            let Some(body) = fetcher.fetch(&paged).await.into_body() else {
                break StopReason::FetchFailed;
            };

            let parsed = parse_page(&body, &paged);
            let found = self
                .classifier
                .classify(&parsed.links, LinkShape::Listing, None);

            if found.is_empty() {
                tracing::info!("No listing links found on page: {}", paged);
                break StopReason::EmptyPage;
            }

            let mut added = 0usize;
            for listing in found {
                if seen.insert(listing.url.to_string()) {
                    tracing::debug!("Found listing URL: {}", listing.url);
                    listings.push(listing.url);
                    added += 1;
                }
            }
            tracing::debug!("Page {} of {} added {} new listings", page, sub_region_url, added);

            if !parsed.has_next_page {
                tracing::info!("No more pages found for: {}", sub_region_url);
                break StopReason::NoNextControl;
            }

            page += 1;
            tracing::info!("Proceeding to page {} for: {}", page, sub_region_url);
        };

        Pagination {
            listings,
            pages_fetched: page_count(page, stop),
            stop,
        }
    }
}

/// Number of pages requested when the loop stopped on `cursor`
fn page_count(cursor: u32, stop: StopReason) -> u32 {
    match stop {
        StopReason::PageLimit => cursor - 1,
        _ => cursor,
    }
}
