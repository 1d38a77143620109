//! Stop identity and stop visit types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ServiceTime;

/// A feed stop identifier, as text.
///
/// Reference sequences and trip stop lists compare these directly, so the
/// feed's spelling is kept (after merged-ID cleanup).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Creates a stop id from feed text.
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(value: &str) -> Self {
        StopId::new(value)
    }
}

/// A stop as provided by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRecord {
    /// Feed stop id
    pub id: StopId,
    /// Raw stop name
    pub name: String,
}

/// One visit of a trip to a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopVisit {
    /// The stop visited
    pub stop_id: StopId,
    /// Scheduled arrival, if the feed gives one
    pub arrival: Option<ServiceTime>,
}

impl StopVisit {
    /// Creates a visit with no arrival time.
    pub fn new(stop_id: impl Into<StopId>) -> Self {
        Self {
            stop_id: stop_id.into(),
            arrival: None,
        }
    }

    /// Creates a visit with an arrival time.
    pub fn at(stop_id: impl Into<StopId>, arrival: ServiceTime) -> Self {
        Self {
            stop_id: stop_id.into(),
            arrival: Some(arrival),
        }
    }
}
