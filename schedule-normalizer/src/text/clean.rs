//! Shared text-cleaning helpers used by both headsign and stop-name cleaning.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Words kept lowercase by [`capitalize_words`] so destination truncation can
/// still find them.
const CONNECTOR_WORDS: [&str; 2] = ["to", "via"];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}[\p{L}'’]*").unwrap());

static SAINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsaint\b").unwrap());

static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\band\b").unwrap());
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*&\s*").unwrap());

static AT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bat\b").unwrap());
static SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").unwrap());

static POINTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.+(\s|$)").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,;:)])").unwrap());
static SPACE_AFTER_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s+").unwrap());

/// Street-type words and their abbreviations.
const STREET_TYPES: &[(&str, &str)] = &[
    ("avenue", "Ave"),
    ("boulevard", "Blvd"),
    ("centre|center", "Ctr"),
    ("court", "Ct"),
    ("crescent", "Cres"),
    ("crossing", "Xing"),
    ("drive", "Dr"),
    ("heights", "Hts"),
    ("highway", "Hwy"),
    ("hills", "Hls"),
    ("lake", "Lk"),
    ("lane", "Ln"),
    ("mount", "Mt"),
    ("park", "Pk"),
    ("parkway", "Pkwy"),
    ("place", "Pl"),
    ("point", "Pt"),
    ("road", "Rd"),
    ("square", "Sq"),
    ("street", "St"),
    ("terrace", "Terr"),
];

static STREET_TYPE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    STREET_TYPES
        .iter()
        .map(|(words, abbrev)| {
            let re = Regex::new(&format!(r"(?i)\b(?:{words})\b")).unwrap();
            (re, *abbrev)
        })
        .collect()
});

/// Spelled-out ordinals found in street names.
const ORDINALS: &[(&str, &str)] = &[
    ("first", "1st"),
    ("second", "2nd"),
    ("third", "3rd"),
    ("fourth", "4th"),
    ("fifth", "5th"),
    ("sixth", "6th"),
    ("seventh", "7th"),
    ("eighth", "8th"),
    ("ninth", "9th"),
    ("tenth", "10th"),
];

static ORDINAL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ORDINALS
        .iter()
        .map(|(word, short)| (Regex::new(&format!(r"(?i)\b{word}\b")).unwrap(), *short))
        .collect()
});

/// True when the text has uppercase letters and no lowercase ones.
///
/// Digits, punctuation and whitespace are ignored.
pub fn is_uppercase_only(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Capitalize the first letter of every word.
///
/// Words written entirely in capitals (two letters or more) are lowercased
/// first, so "MUMFORD" becomes "Mumford" while "N Preston" keeps its initial.
/// "to" and "via" stay lowercase.
pub fn capitalize_words(text: &str) -> String {
    WORD.replace_all(text, |caps: &Captures<'_>| capitalize_word(&caps[0]))
        .into_owned()
}

fn capitalize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if CONNECTOR_WORDS.contains(&lower.as_str()) {
        return lower;
    }
    // "aB" would capitalize to "AB", which a second pass would read as shouting.
    let capitalized = upper_first(word);
    if capitalized.chars().count() >= 2 && is_uppercase_only(&capitalized) {
        upper_first(&lower)
    } else {
        capitalized
    }
}

fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "Saint" → "St".
pub fn clean_saint(text: &str) -> String {
    SAINT.replace_all(text, "St").into_owned()
}

/// "and" → "&", with single spaces around every ampersand.
pub fn clean_and(text: &str) -> String {
    let text = AND.replace_all(text, "&");
    AMPERSAND.replace_all(&text, " & ").into_owned()
}

/// "at" → "/", with single spaces around every slash.
pub fn clean_at(text: &str) -> String {
    let text = AT.replace_all(text, "/");
    clean_slashes(&text)
}

/// Single spaces around every slash.
pub fn clean_slashes(text: &str) -> String {
    SLASH.replace_all(text, " / ").into_owned()
}

/// Abbreviate street types ("Street" → "St", "Road" → "Rd", ...).
pub fn clean_street_types(text: &str) -> String {
    STREET_TYPE_PATTERNS
        .iter()
        .fold(text.to_owned(), |acc, (re, abbrev)| {
            re.replace_all(&acc, *abbrev).into_owned()
        })
}

/// Spelled-out ordinals to digits ("First" → "1st").
pub fn clean_numbers(text: &str) -> String {
    ORDINAL_PATTERNS
        .iter()
        .fold(text.to_owned(), |acc, (re, short)| {
            re.replace_all(&acc, *short).into_owned()
        })
}

/// Final tidy-up of a label.
///
/// Drops abbreviation points, collapses whitespace, removes spaces before
/// closing punctuation, trims dangling separators at both ends and
/// capitalizes the first letter.
pub fn clean_label(text: &str) -> String {
    let text = POINTS.replace_all(text, "$1");
    let text = SPACES.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = SPACE_AFTER_PAREN.replace_all(&text, "(");
    let text = text.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | '-' | '/' | '&' | ';' | ':' | '.')
    });
    upper_first(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_only_detection() {
        assert!(is_uppercase_only("MUMFORD TERMINAL"));
        assert!(is_uppercase_only("12 TO DOWNTOWN"));
        assert!(!is_uppercase_only("Mumford Terminal"));
        assert!(!is_uppercase_only("1234"));
        assert!(!is_uppercase_only(""));
    }

    #[test]
    fn capitalize_plain_words() {
        assert_eq!(capitalize_words("main st"), "Main St");
        assert_eq!(capitalize_words("st mary's"), "St Mary's");
        assert_eq!(capitalize_words("mic-mac"), "Mic-Mac");
    }

    #[test]
    fn capitalize_lowers_shouting_words() {
        assert_eq!(capitalize_words("Bayers Lake IKEA"), "Bayers Lake Ikea");
        assert_eq!(capitalize_words("N Preston"), "N Preston");
    }

    #[test]
    fn capitalize_keeps_connectors_lowercase() {
        assert_eq!(capitalize_words("mumford To downtown VIA spring"), "Mumford to Downtown via Spring");
    }

    #[test]
    fn capitalize_route_letter_suffix() {
        assert_eq!(capitalize_words("9a downtown"), "9A Downtown");
    }

    #[test]
    fn saint_and_ampersand() {
        assert_eq!(clean_saint("Saint Mary's"), "St Mary's");
        assert_eq!(clean_and("Sheldrake Lk and Tantallon"), "Sheldrake Lk & Tantallon");
        assert_eq!(clean_and("Quinpool&Oxford"), "Quinpool & Oxford");
        assert_eq!(clean_and("Anderson Rd"), "Anderson Rd");
    }

    #[test]
    fn at_becomes_slash() {
        assert_eq!(clean_at("Barrington St at Duke St"), "Barrington St / Duke St");
        assert_eq!(clean_at("Atlantic St"), "Atlantic St");
    }

    #[test]
    fn street_types() {
        assert_eq!(clean_street_types("Spring Garden Road"), "Spring Garden Rd");
        assert_eq!(clean_street_types("Bayers Lake"), "Bayers Lk");
        assert_eq!(clean_street_types("Portland Hills"), "Portland Hls");
        assert_eq!(clean_street_types("Tacoma Centre"), "Tacoma Ctr");
        assert_eq!(clean_street_types("Dartmouth Crossing"), "Dartmouth Xing");
        assert_eq!(clean_street_types("Streetsville"), "Streetsville");
    }

    #[test]
    fn ordinals() {
        assert_eq!(clean_numbers("First St"), "1st St");
        assert_eq!(clean_numbers("Fifth Avenue"), "5th Avenue");
        assert_eq!(clean_numbers("Firstfed"), "Firstfed");
    }

    #[test]
    fn label_cleanup() {
        assert_eq!(clean_label("  downtown   hfx  "), "Downtown hfx");
        assert_eq!(clean_label("1234 Main St , "), "1234 Main St");
        assert_eq!(clean_label("& Downtown"), "Downtown");
        assert_eq!(clean_label("St. Mary's"), "St Mary's");
        assert_eq!(clean_label("Main St /"), "Main St");
        assert_eq!(clean_label(""), "");
    }
}
