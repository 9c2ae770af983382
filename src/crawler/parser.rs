//! Link and pagination extraction for directory pages

use crate::links::PageLink;
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from a directory page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// All followable links on the page (absolute URLs)
    pub links: Vec<PageLink>,

    /// Whether a pagination container holds a "next" link
    pub has_next_page: bool,
}

/// Reads the links and pagination state of a directory page
///
/// Every `<a href>` is kept except `download` links, in-page anchors and
/// `javascript:`/`mailto:`/`tel:`/`data:` targets. Relative hrefs are resolved
/// against `base_url`, the address the page was fetched from.
///
/// # Example
///
/// ```
/// use advisor_harvest::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<a href="/financial-advisors/ohio">Ohio</a>
///     <div class="pagination"><a href="?page=2">Next &raquo;</a></div>"#;
/// let base_url = Url::parse("https://example.com/financial-advisors.asp").unwrap();
/// let parsed = parse_page(html, &base_url);
/// assert_eq!(parsed.links[0].text, "Ohio");
/// assert!(parsed.has_next_page);
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        links: extract_links(&document, base_url),
        has_next_page: has_next_control(&document),
    }
}

/// Schemes whose links never lead to a directory page
const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];

fn extract_links(document: &Html, base_url: &Url) -> Vec<PageLink> {
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&anchors)
        .filter(|anchor| anchor.value().attr("download").is_none())
        .filter_map(|anchor| {
            let url = resolve_link(anchor.value().attr("href")?, base_url)?;
            Some(PageLink::new(url, &anchor.text().collect::<String>()))
        })
        .collect()
}

/// Checks for a case-insensitive "next" link inside `div.pagination`
fn has_next_control(document: &Html) -> bool {
    let Ok(next_selector) = Selector::parse("div.pagination a") else {
        return false;
    };

    document.select(&next_selector).any(|link| {
        link.text()
            .collect::<String>()
            .to_lowercase()
            .contains("next")
    })
}

/// Absolute http(s) target of `href`, or `None` for in-page anchors, skipped
/// schemes and unresolvable values
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let skipped = SKIPPED_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(scheme))
    });
    if skipped {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
