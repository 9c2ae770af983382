use url::Url;

/// The three URL shapes of the directory hierarchy
///
/// Shapes are matched against the path segments that follow the directory's
/// path prefix, so with prefix `financial-advisors`:
///
/// | Shape       | Example path                                          |
/// |-------------|-------------------------------------------------------|
/// | `Region`    | `/financial-advisors/new-york`                        |
/// | `SubRegion` | `/financial-advisors/new-york/albany`                 |
/// | `Listing`   | `/financial-advisors/new-york/albany/acme-wealth/123` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkShape {
    Region,
    SubRegion,
    Listing,
}

impl LinkShape {
    /// Checks whether the segments (prefix already removed) fit this shape
    pub fn matches(&self, segments: &[&str]) -> bool {
        match self {
            LinkShape::Region => segments.len() == 1 && is_name_segment(segments[0]),
            LinkShape::SubRegion => {
                segments.len() == 2 && segments.iter().all(|s| is_name_segment(s))
            }
            LinkShape::Listing => {
                segments.len() >= 4
                    && is_name_segment(segments[0])
                    && is_name_segment(segments[1])
                    && segments[2..segments.len() - 1].iter().all(|s| !s.is_empty())
                    && is_numeric_segment(segments[segments.len() - 1])
            }
        }
    }
}

/// Letters and hyphens only
pub fn is_name_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

/// Returns the path segments of `url` that follow `prefix`
///
/// Returns `None` when the URL is on another origin or its path does not start
/// with the prefix segment. A single trailing slash is ignored.
pub fn segments_after_prefix<'a>(url: &'a Url, base: &Url, prefix: &str) -> Option<Vec<&'a str>> {
    if url.origin() != base.origin() {
        return None;
    }

    let mut segments: Vec<&str> = url.path_segments()?.collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }

    match segments.split_first() {
        Some((first, rest)) if *first == prefix => Some(rest.to_vec()),
        _ => None,
    }
}
