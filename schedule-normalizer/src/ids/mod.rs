//! Feed identifier resolution.
//!
//! The feed's own route and stop ids change between releases, so curated
//! tables key on ids derived from stable rider-facing names: the route short
//! name and the stop's "GoTime" number.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::RouteId;

/// Errors from resolving feed identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The route short name has no rule and no usable number.
    #[error("unexpected route id for short name '{0}'")]
    UnexpectedRouteId(String),

    /// The stop id has no numeric component.
    #[error("unexpected stop id '{0}'")]
    UnexpectedStopId(String),
}

/// Offset added to the number of a route with an `a` suffix.
const SUFFIX_A_OFFSET: u64 = 1_000_000;
/// Offset added to the number of a route with a `b` suffix.
const SUFFIX_B_OFFSET: u64 = 2_000_000;

/// Community and special routes whose short names carry no usable number.
const NAMED_ROUTES: &[(&str, u64)] = &[
    ("cp1", 100_001),
    ("ecrl", 100_002),
    ("ecs", 100_003),
    ("hwst", 100_004),
    ("mack", 100_005),
    ("macd", 100_006),
    ("sp14", 100_014),
    ("sp53", 100_053),
    ("sp58", 100_058),
    ("sp65", 100_065),
    ("fv01", 100_101),
    ("sp6", 100_106),
    ("s14", 100_114),
];

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static MERGED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_merged_\d+$").unwrap());

fn is_digits_only(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve a route id from the route short name.
///
/// ```
/// use schedule_normalizer::domain::RouteId;
/// use schedule_normalizer::ids::route_id;
///
/// assert_eq!(route_id("52").unwrap(), RouteId(52));
/// assert_eq!(route_id("S14").unwrap(), RouteId(100_114));
/// assert_eq!(route_id("9A").unwrap(), RouteId(1_000_009));
/// assert!(route_id("Ferry").is_err());
/// ```
pub fn route_id(short_name: &str) -> Result<RouteId, IdError> {
    let unexpected = || IdError::UnexpectedRouteId(short_name.to_owned());
    let trimmed = short_name.trim();

    if is_digits_only(trimmed) {
        return trimmed.parse().map(RouteId).map_err(|_| unexpected());
    }
    let lower = trimmed.to_ascii_lowercase();
    if let Some((_, id)) = NAMED_ROUTES.iter().find(|(name, _)| *name == lower) {
        return Ok(RouteId(*id));
    }

    let digits: u64 = DIGITS
        .find(trimmed)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(unexpected)?;
    let offset = if lower.ends_with('a') {
        SUFFIX_A_OFFSET
    } else if lower.ends_with('b') {
        SUFFIX_B_OFFSET
    } else {
        return Err(unexpected());
    };
    digits
        .checked_add(offset)
        .map(RouteId)
        .ok_or_else(unexpected)
}

/// Numeric stop id: the whole id if it is all digits, else its first run of
/// digits.
pub fn stop_id(feed_id: &str) -> Result<u32, IdError> {
    stop_code(feed_id)?
        .parse()
        .map_err(|_| IdError::UnexpectedStopId(feed_id.to_owned()))
}

/// Rider-facing stop code: the same digits as [`stop_id`], as text.
pub fn stop_code(feed_id: &str) -> Result<String, IdError> {
    if is_digits_only(feed_id) {
        return Ok(feed_id.to_owned());
    }
    DIGITS
        .find(feed_id)
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| IdError::UnexpectedStopId(feed_id.to_owned()))
}

/// Drop the `_merged_<n>` suffix the feed adds to deduplicated ids.
pub fn clean_merged_id(feed_id: &str) -> String {
    MERGED_SUFFIX.replace(feed_id, "").into_owned()
}

/// Short names with letters are shown in uppercase.
pub fn route_short_name(short_name: &str) -> String {
    let trimmed = short_name.trim();
    if is_digits_only(trimmed) {
        trimmed.to_owned()
    } else {
        trimmed.to_uppercase()
    }
}

/// Long names lose their leading "* " markers.
pub fn route_long_name(long_name: &str) -> String {
    long_name.replace("* ", "").trim().to_owned()
}
