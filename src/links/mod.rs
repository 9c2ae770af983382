//! Link classification for the directory hierarchy
//!
//! Every fetched page yields its full set of hyperlinks. The classifier keeps
//! the ones whose path fits a [`LinkShape`] and turns them into named links,
//! skipping everything else (most links on a directory page are unrelated
//! navigation).

mod names;
mod shape;

pub use names::{name_key, names_match, normalize_whitespace, segment_to_name};
pub use shape::{is_name_segment, segments_after_prefix, LinkShape};

use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// A hyperlink found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Absolute target URL
    pub url: Url,

    /// Visible link text, whitespace-collapsed
    pub text: String,
}

impl PageLink {
    pub fn new(url: Url, text: &str) -> Self {
        Self {
            url,
            text: normalize_whitespace(text),
        }
    }
}

/// A classified link: display name and target
///
/// For `Region` and `SubRegion` the name is the link text; for `Listing` it is
/// the target URL itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLink {
    pub name: String,
    pub url: Url,
}

/// Why a link was not classified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("path does not fit the {0:?} shape")]
    ShapeMismatch(LinkShape),

    #[error("link region '{segment}' does not match current region '{scope}'")]
    RegionMismatch { segment: String, scope: String },

    #[error("region link has no visible text")]
    MissingText,
}

/// Matches page links against the directory's URL shapes
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    base: Url,
    prefix: String,
}

impl LinkClassifier {
    /// Creates a classifier for links under `base` whose path starts with `prefix`
    pub fn new(base: Url, prefix: &str) -> Self {
        Self {
            base,
            prefix: prefix.trim().to_string(),
        }
    }

    /// Classifies a single link
    ///
    /// `scope` is the name of the region currently being crawled; when given,
    /// `SubRegion` links whose region segment names a different region are
    /// rejected. `Region` links need visible text. `Listing` targets lose their
    /// query and fragment, which never select a different detail page.
    pub fn classify_link(
        &self,
        link: &PageLink,
        shape: LinkShape,
        scope: Option<&str>,
    ) -> Result<NamedLink, Rejection> {
        let segments = segments_after_prefix(&link.url, &self.base, &self.prefix)
            .ok_or(Rejection::ShapeMismatch(shape))?;

        if !shape.matches(&segments) {
            return Err(Rejection::ShapeMismatch(shape));
        }

        let name = match shape {
            LinkShape::Region => {
                if link.text.is_empty() {
                    return Err(Rejection::MissingText);
                }
                link.text.clone()
            }
            LinkShape::SubRegion => {
                if let Some(scope) = scope {
                    let region = segment_to_name(segments[0]);
                    if !names_match(&region, scope) {
                        return Err(Rejection::RegionMismatch {
                            segment: region,
                            scope: scope.to_string(),
                        });
                    }
                }
                display_name(&link.text, segments[1])
            }
            LinkShape::Listing => {
                let mut url = link.url.clone();
                url.set_query(None);
                url.set_fragment(None);
                return Ok(NamedLink {
                    name: url.to_string(),
                    url,
                });
            }
        };

        Ok(NamedLink {
            name,
            url: link.url.clone(),
        })
    }

    /// Classifies a page's links, keeping the first link for each name
    ///
    /// The result preserves discovery order and has unique names.
    pub fn classify(
        &self,
        links: &[PageLink],
        shape: LinkShape,
        scope: Option<&str>,
    ) -> Vec<NamedLink> {
        let mut seen = HashSet::new();
        let mut classified = Vec::new();

        for link in links {
            match self.classify_link(link, shape, scope) {
                Ok(named) => {
                    let key = match shape {
                        LinkShape::Listing => named.name.clone(),
                        _ => name_key(&named.name),
                    };
                    if seen.insert(key) {
                        tracing::trace!("Classified {:?} link: {} -> {}", shape, named.name, named.url);
                        classified.push(named);
                    } else {
                        tracing::trace!("Duplicate {:?} link skipped: {}", shape, link.url);
                    }
                }
                Err(rejection @ Rejection::RegionMismatch { .. }) => {
                    tracing::warn!("Skipping link {}: {}", link.url, rejection);
                }
                Err(Rejection::MissingText) => {
                    tracing::debug!("Skipping region link {} without text", link.url);
                }
                Err(Rejection::ShapeMismatch(_)) => {}
            }
        }

        classified
    }
}

/// Link text when present, otherwise the name spelled by the URL segment
fn display_name(text: &str, segment: &str) -> String {
    if text.is_empty() {
        segment_to_name(segment)
    } else {
        text.to_string()
    }
}
