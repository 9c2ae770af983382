//! Address block parsing
//!
//! The contact block is a loose stack of text lines. Lines 0 and 1 are the
//! street lines, line 2 is the combined "City, ST" line and line 3, when
//! present, is the zip. The combined line is read by the first rule in
//! [`LOCALITY_RULES`] that applies.

use regex::Regex;

/// Address fields read from a contact block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Where the zip comes from once the combined line has been read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipSource {
    /// The line after the combined line
    NextLine,
    /// Read from the combined line itself (`None`: the line had no zip)
    Inline(Option<String>),
}

/// City, state and zip read from the combined line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: ZipSource,
}

/// A rule reading the combined line; `None` when it does not apply
pub type LocalityRule = fn(&AddressParser, &str) -> Option<Locality>;

/// Combined-line rules, tried in order
pub const LOCALITY_RULES: &[(&str, LocalityRule)] = &[
    ("city-state", city_state_rule),
    ("comma-split", comma_split_rule),
];

/// Result of parsing the address lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub address: Address,
    /// Name of the locality rule that applied, if any
    pub rule: Option<&'static str>,
}

/// Holds the compiled patterns used by the locality rules
#[derive(Debug, Clone)]
pub struct AddressParser {
    city_state: Regex,
}

impl AddressParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            city_state: Regex::new(r"^(.*),\s*([A-Z]{2})$")?,
        })
    }

    /// Reads the combined line with the first applicable rule
    pub fn locality(&self, line: &str) -> Option<(&'static str, Locality)> {
        LOCALITY_RULES
            .iter()
            .find_map(|(name, rule)| rule(self, line).map(|locality| (*name, locality)))
    }

    /// Assigns address fields from the block's text lines
    ///
    /// Fewer than three lines means the block cannot be read and every field
    /// stays unavailable.
    pub fn parse(&self, lines: &[String]) -> ParsedAddress {
        if lines.len() < 3 {
            return ParsedAddress {
                address: Address::default(),
                rule: None,
            };
        }

        let mut address = Address {
            street: non_empty(&lines[0]),
            street2: non_empty(&lines[1]),
            ..Default::default()
        };
        let next_line = lines.get(3).and_then(|line| non_empty(line));

        let rule = match self.locality(&lines[2]) {
            Some((name, locality)) => {
                address.city = locality.city;
                address.state = locality.state;
                address.zip = match locality.zip {
                    ZipSource::NextLine => next_line,
                    ZipSource::Inline(zip) => zip,
                };
                Some(name)
            }
            None => None,
        };

        ParsedAddress { address, rule }
    }
}

/// "Springfield, IL" -> city and two-letter state; zip from the next line
fn city_state_rule(parser: &AddressParser, line: &str) -> Option<Locality> {
    let captures = parser.city_state.captures(line.trim())?;
    Some(Locality {
        city: captures.get(1).and_then(|m| non_empty(m.as_str())),
        state: captures.get(2).and_then(|m| non_empty(m.as_str())),
        zip: ZipSource::NextLine,
    })
}

/// "Springfield, IL 62704" -> split on the comma, then on whitespace
///
/// Applies to any line with exactly one comma. When the part after the comma
/// has fewer than two tokens, state and zip are both unavailable.
fn comma_split_rule(_parser: &AddressParser, line: &str) -> Option<Locality> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 2 {
        return None;
    }

    let tokens: Vec<&str> = parts[1].split_whitespace().collect();
    let (state, zip) = if tokens.len() >= 2 {
        (non_empty(tokens[0]), non_empty(tokens[1]))
    } else {
        (None, None)
    };

    Some(Locality {
        city: non_empty(parts[0]),
        state,
        zip: ZipSource::Inline(zip),
    })
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
