//! Stop-name cleaning.
//!
//! Stop names share the label helpers with headsigns but have their own
//! pre-pass: civic addresses are reordered, bracketed service notes are
//! dropped and crossing qualifiers ("before", "opposite", ...) become slashes.

use std::sync::LazyLock;

use regex::Regex;

use super::clean;

static CIVIC_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcivic\s+address\s*").unwrap());

/// Alternatives are listed longest first so "after and opposite" is never
/// cut short at "after".
const CROSSING_QUALIFIERS: &str = "after and opposite|before and opposite|opposite and after|\
                                   opposite and before|afteropposite|beforeopposite|\
                                   oppositeafter|oppositebefore|in front of|after|before|opposite";

static TRAILING_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\s*\b(?:{CROSSING_QUALIFIERS})\s*$")).unwrap()
});
static CROSSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\s*\b(?:{CROSSING_QUALIFIERS})\b\s*")).unwrap()
});

static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static CHEVRONS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^>]*)>").unwrap());
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d+\)\s*$").unwrap());

/// Clean a feed stop name for display.
///
/// ```
/// use schedule_normalizer::text::clean_stop_name;
///
/// assert_eq!(clean_stop_name("Civic Address 1234 Main St [AM ONLY]"), "1234 Main St");
/// assert_eq!(clean_stop_name("BARRINGTON ST BEFORE SPRING GARDEN RD"), "Barrington St / Spring Garden Rd");
/// ```
pub fn clean_stop_name(name: &str) -> String {
    let mut label = if clean::is_uppercase_only(name) {
        name.to_lowercase()
    } else {
        name.to_owned()
    };
    label = clean::capitalize_words(&label);
    label = reorder_civic_address(&label);
    label = BRACKETS.replace_all(&label, "").into_owned();
    label = CHEVRONS.replace_all(&label, "$1").into_owned();
    label = CROSSING.replace_all(&label, " / ").into_owned();
    label = clean::clean_slashes(&label);
    label = TRAILING_NUMBER.replace(&label, "").into_owned();
    label = clean::clean_and(&label);
    label = clean::clean_at(&label);
    label = clean::clean_saint(&label);
    label = clean::clean_street_types(&label);
    label = clean::clean_numbers(&label);
    clean::clean_label(&label)
}

/// "Mumford Rd opposite Civic Address 6960" → "6960, Mumford Rd".
///
/// The address number moves to the front and whatever crossing qualifier
/// preceded the marker is dropped.
fn reorder_civic_address(name: &str) -> String {
    let Some(m) = CIVIC_ADDRESS.find(name) else {
        return name.to_owned();
    };
    let before = TRAILING_QUALIFIER.replace(&name[..m.start()], "");
    let after = &name[m.end()..];
    format!("{}, {}", after.trim(), before.trim())
}
