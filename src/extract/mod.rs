//! Record extraction from listing detail pages
//!
//! A detail page has no semantic markup for its contact details. The only
//! anchor is a `div` carrying a specific inline margin style; everything else
//! is read from loose text inside it. Extraction never fails: any field that
//! cannot be read is left unavailable.

mod address;
mod record;

pub use address::{
    Address, AddressParser, Locality, LocalityRule, ParsedAddress, ZipSource, LOCALITY_RULES,
};
pub use record::{AdvisorRecord, COLUMNS, NOT_AVAILABLE};

use crate::links::normalize_whitespace;
use crate::HarvestError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Inline style of the contact block
const CONTACT_BLOCK_STYLE: &str = r"margin:\s*20px\s+0\s+20px\s+0";

/// Phone line label, matched at the start of a line
const PHONE_LABEL: &str = r"(?i)^\s*tel:";

const MAIL_PREFIX: &str = "mailto:";

/// Extracts [`AdvisorRecord`]s from detail page HTML
///
/// Selectors and patterns are compiled once in [`RecordExtractor::new`].
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    heading: Selector,
    styled_div: Selector,
    div: Selector,
    link: Selector,
    contact_style: Regex,
    phone_label: Regex,
    address: AddressParser,
}

impl RecordExtractor {
    pub fn new() -> Result<Self, HarvestError> {
        Ok(Self {
            heading: selector("h1")?,
            styled_div: selector("div[style]")?,
            div: selector("div")?,
            link: selector("a[href]")?,
            contact_style: pattern(CONTACT_BLOCK_STYLE)?,
            phone_label: pattern(PHONE_LABEL)?,
            address: AddressParser::new().map_err(|e| HarvestError::Extractor(e.to_string()))?,
        })
    }

    /// Builds a record from a detail page
    ///
    /// # Field rules
    ///
    /// | Field                | Source                                              |
    /// |----------------------|-----------------------------------------------------|
    /// | Company              | text of the first `<h1>`                            |
    /// | First/Last Name      | never published by the directory                    |
    /// | Phone                | `div` in the contact block starting with "Tel:"     |
    /// | Street ... Zip       | remaining contact block lines, see [`AddressParser`]|
    /// | Email                | first `mailto:` link target                         |
    pub fn extract(&self, html: &str) -> AdvisorRecord {
        let document = Html::parse_document(html);

        let mut record = AdvisorRecord {
            company: self.company(&document),
            email: self.email(&document),
            ..Default::default()
        };

        match self.contact_block(&document) {
            Some(block) => {
                let phone_line = self.phone_line(block);
                record.phone = phone_line.and_then(|line| self.phone(line));
                if record.phone.is_none() {
                    tracing::debug!("No phone line in contact block");
                }

                let lines = self.address_lines(block, phone_line);
                let parsed = self.address.parse(&lines);
                match parsed.rule {
                    Some("city-state") => {}
                    Some(rule) => tracing::debug!("Locality read by fallback rule '{}'", rule),
                    None => tracing::debug!(
                        "Address block unreadable ({} lines); locality unavailable",
                        lines.len()
                    ),
                }

                let Address {
                    street,
                    street2,
                    city,
                    state,
                    zip,
                } = parsed.address;
                record.street = street;
                record.street2 = street2;
                record.city = city;
                record.state = state;
                record.zip = zip;
            }
            None => {
                tracing::debug!("No contact block; address and phone unavailable");
            }
        }

        record
    }

    fn company(&self, document: &Html) -> Option<String> {
        document
            .select(&self.heading)
            .next()
            .map(|heading| normalize_whitespace(&heading.text().collect::<String>()))
            .filter(|name| !name.is_empty())
    }

    fn contact_block<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.styled_div).find(|div| {
            div.value()
                .attr("style")
                .map_or(false, |style| self.contact_style.is_match(style))
        })
    }

    /// Innermost `div` whose text starts with the phone label
    ///
    /// A `div` wrapping other `div`s is never the phone line, even when its
    /// first line is.
    fn phone_line<'a>(&self, block: ElementRef<'a>) -> Option<ElementRef<'a>> {
        block
            .select(&self.div)
            .filter(|div| !contains_div(*div))
            .find(|div| self.phone_label.is_match(&joined_text(*div)))
    }

    fn phone(&self, line: ElementRef<'_>) -> Option<String> {
        let text = joined_text(line);
        let number = self.phone_label.replace(&text, "");
        let number = number.trim();
        if number.is_empty() {
            None
        } else {
            Some(number.to_string())
        }
    }

    /// Non-empty text lines of the block in document order, minus phone lines
    fn address_lines(&self, block: ElementRef<'_>, phone_line: Option<ElementRef<'_>>) -> Vec<String> {
        block
            .descendants()
            .filter(|node| match phone_line {
                Some(phone) => !node.ancestors().any(|ancestor| ancestor.id() == phone.id()),
                None => true,
            })
            .filter_map(|node| node.value().as_text().map(|text| text.trim().to_string()))
            .filter(|line| !line.is_empty() && !self.phone_label.is_match(line))
            .collect()
    }

    fn email(&self, document: &Html) -> Option<String> {
        let href = document
            .select(&self.link)
            .filter_map(|link| link.value().attr("href"))
            .map(str::trim)
            .find(|href| {
                href.get(..MAIL_PREFIX.len())
                    .map_or(false, |scheme| scheme.eq_ignore_ascii_case(MAIL_PREFIX))
            })?;

        let address = href[MAIL_PREFIX.len()..].trim();
        if address.is_empty() {
            None
        } else {
            Some(address.to_string())
        }
    }
}

fn contains_div(element: ElementRef<'_>) -> bool {
    element
        .descendants()
        .skip(1)
        .any(|node| node.value().as_element().map_or(false, |e| e.name() == "div"))
}

/// Trimmed text pieces of an element, concatenated
fn joined_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn selector(css: &str) -> Result<Selector, HarvestError> {
    Selector::parse(css)
        .map_err(|e| HarvestError::Extractor(format!("Invalid selector '{}': {:?}", css, e)))
}

fn pattern(source: &str) -> Result<Regex, HarvestError> {
    Regex::new(source).map_err(|e| HarvestError::Extractor(e.to_string()))
}
