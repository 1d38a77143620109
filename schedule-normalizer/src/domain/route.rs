//! Route identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved numeric route identifier.
///
/// Route ids are derived from the feed's route short name (see
/// [`crate::ids::route_id`]) and are stable across feed releases, which is
/// why every curated table is keyed on them.
///
/// # Examples
///
/// ```
/// use schedule_normalizer::domain::RouteId;
///
/// let id = RouteId(52);
/// assert_eq!(id.to_string(), "52");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u64);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RouteId {
    fn from(value: u64) -> Self {
        RouteId(value)
    }
}

/// A route after identifier resolution and name cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    /// Resolved route id
    pub id: RouteId,
    /// Short name as displayed to riders (e.g. "52", "S14")
    pub short_name: String,
    /// Long descriptive name
    pub long_name: String,
}

impl RouteRecord {
    /// Creates a new route record.
    pub fn new(id: RouteId, short_name: impl Into<String>, long_name: impl Into<String>) -> Self {
        Self {
            id,
            short_name: short_name.into(),
            long_name: long_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(RouteId(100_114).to_string(), "100114");
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(RouteId(9) < RouteId(10));
        assert!(RouteId(10) < RouteId(1_000_009));
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&RouteId(52)).unwrap();
        assert_eq!(json, "52");
        let back: RouteId = serde_json::from_str("52").unwrap();
        assert_eq!(back, RouteId(52));
    }

    #[test]
    fn record_new() {
        let route = RouteRecord::new(RouteId(1), "1", "Spring Garden");
        assert_eq!(route.id, RouteId(1));
        assert_eq!(route.short_name, "1");
        assert_eq!(route.long_name, "Spring Garden");
    }
}
