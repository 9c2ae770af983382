//! Region validation
//!
//! Directory pages link to plenty of things that look like regions but are not
//! (navigation, promotions, "all states"). Only names in the closed list below
//! are crawled.

/// The 50 states plus the District of Columbia
pub const VALID_REGIONS: [&str; 51] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "District of Columbia",
];

/// Collapses whitespace and capitalizes each word ("  new   YORK " -> "New York")
pub fn normalize_region_name(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Returns the list spelling of a region name, if it is one
///
/// Matching ignores case, so "district of columbia" and "DISTRICT OF COLUMBIA"
/// both resolve to "District of Columbia".
pub fn canonical_region_name(name: &str) -> Option<&'static str> {
    let normalized = normalize_region_name(name);
    if normalized.is_empty() {
        return None;
    }

    VALID_REGIONS
        .iter()
        .copied()
        .find(|valid| valid.eq_ignore_ascii_case(&normalized))
}

/// Checks whether a link text names one of the known regions
///
/// # Examples
///
/// ```
/// use advisor_harvest::is_valid_region;
///
/// assert!(is_valid_region("  new   YORK "));
/// assert!(!is_valid_region("All States"));
/// ```
pub fn is_valid_region(name: &str) -> bool {
    canonical_region_name(name).is_some()
}
