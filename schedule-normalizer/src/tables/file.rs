//! On-disk JSON shape of the curated tables.

use serde::{Deserialize, Serialize};

use crate::domain::{DirectionId, Headsign, RouteId};
use crate::split::MatchToken;

/// Top-level table file. Missing sections are empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableFile {
    #[serde(default)]
    pub merge: Vec<MergeRuleEntry>,
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
    #[serde(default)]
    pub splits: Vec<SplitEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MergeRuleEntry {
    pub route_id: RouteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_key: Option<String>,
    pub inputs: Vec<String>,
    pub output: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub route_id: RouteId,
    pub direction_id: DirectionId,
    pub headsign: Headsign,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SplitEntry {
    pub route_id: RouteId,
    /// Direction 0 first, then direction 1.
    pub directions: [SplitDirectionEntry; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SplitDirectionEntry {
    pub headsign: Headsign,
    pub stops: Vec<MatchToken>,
}
