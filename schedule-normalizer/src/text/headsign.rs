//! Headsign canonicalization.
//!
//! Turns a free-text feed headsign ("12 TO DOWNTOWN VIA MAIN ST") into the
//! short destination label riders see ("Downtown"). The pipeline is
//! idempotent: canonicalizing a canonical label returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::clean;

/// Separator before the destination. The last one wins.
static TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+to\s+").unwrap());
/// Separator before the routing description. The first one wins.
static VIA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+via\s+").unwrap());

static ROUTE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\p{L}?(?:\s+|$)").unwrap());
static LEADING_TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^to(?:\s+|$)").unwrap());
static TRAILING_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s+)only\s*$").unwrap());

static SERVICE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:metrolink|express)\b").unwrap());

static TERMINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bterminal\b").unwrap());

/// Place names with a fixed short form.
const PLACES: &[(&str, &str)] = &[
    (r"\bwater\s+st(?:reet)?\.?\s*term\b", "Water St Term"),
    (r"\bmic\s*mac\b", "Micmac"),
    (r"\bjunior\s+high(?:\s+school)?\b", "Jr High"),
    (r"\bmsvu\b", "Mt St Vincent"),
    (r"\bsmu\b", "St Mary's"),
    (r"\bdowntown\s+halifax\b", "Downtown Hfx"),
];

static PLACE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PLACES
        .iter()
        .map(|(pattern, short)| (Regex::new(&format!("(?i){pattern}")).unwrap(), *short))
        .collect()
});

/// Canonicalize a free-text headsign.
///
/// ```
/// use schedule_normalizer::text::canonicalize;
///
/// assert_eq!(canonicalize("12 TO DOWNTOWN VIA MAIN ST"), "Downtown");
/// assert_eq!(canonicalize("Bridge Terminal"), "Bridge Term");
/// assert_eq!(canonicalize("Downtown"), "Downtown");
/// ```
pub fn canonicalize(headsign: &str) -> String {
    let mut label = if clean::is_uppercase_only(headsign) {
        headsign.to_lowercase()
    } else {
        headsign.to_owned()
    };
    label = clean::capitalize_words(&label);
    label = keep_destination(&label).to_owned();
    label = strip_affixes(&label);
    label = TERMINAL.replace_all(&label, "Term").into_owned();
    label = shorten_places(&label);
    label = clean::clean_saint(&label);
    label = clean::clean_and(&label);
    label = clean::clean_street_types(&label);
    // Substitutions can leave a separator in front of a route number.
    let label = strip_affixes(&label);

    trace!(raw = headsign, canonical = %label, "canonicalized headsign");
    label
}

/// Keep only the destination: the text after the last " to ", cut before the
/// first " via " that follows.
fn keep_destination(label: &str) -> &str {
    let label = match TO.find_iter(label).last() {
        Some(m) => &label[m.end()..],
        None => label,
    };
    match VIA.find(label) {
        Some(m) => &label[..m.start()],
        None => label,
    }
}

/// Strip service words, leading route numbers, a leading "to" and a
/// trailing "only" until none remain. Each pass ends with a clean label, so
/// a separator or a point never hides the next prefix.
fn strip_affixes(label: &str) -> String {
    let mut current = clean::clean_label(label);
    loop {
        let next = SERVICE_WORDS.replace_all(&current, " ");
        let next = ROUTE_NUMBER.replace(&next, "");
        let next = LEADING_TO.replace(&next, "");
        let next = TRAILING_ONLY.replace(&next, "");
        let next = clean::clean_label(&next);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn shorten_places(label: &str) -> String {
    PLACE_PATTERNS
        .iter()
        .fold(label.to_owned(), |acc, (re, short)| {
            re.replace_all(&acc, *short).into_owned()
        })
}
