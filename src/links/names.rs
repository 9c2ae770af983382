use crate::region::normalize_region_name;

/// Turns a URL segment into a display name ("new-york" -> "New York")
///
/// Every letter that follows a non-letter is upper-cased, all other letters are
/// lower-cased, so "o-fallon" and "O-FALLON" both become "O Fallon".
pub fn segment_to_name(segment: &str) -> String {
    let spaced = segment.replace('-', " ");
    let mut name = String::with_capacity(spaced.len());
    let mut previous_is_letter = false;

    for c in spaced.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                name.extend(c.to_lowercase());
            } else {
                name.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            name.push(c);
            previous_is_letter = false;
        }
    }

    normalize_whitespace(&name)
}

/// Collapses runs of whitespace and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case- and whitespace-insensitive name comparison
pub fn names_match(left: &str, right: &str) -> bool {
    normalize_region_name(left).to_lowercase() == normalize_region_name(right).to_lowercase()
}

/// Key used for first-wins de-duplication of display names
pub fn name_key(name: &str) -> String {
    normalize_whitespace(name).to_lowercase()
}
