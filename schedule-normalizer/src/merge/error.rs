//! Error types for headsign merging.

use crate::domain::{Headsign, RouteId};

/// Errors from building or consulting a merge table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Two headsigns of one route+direction are not covered by any rule.
    #[error("unexpected headsign merge on route {route_id}: '{first}' and '{second}'")]
    UnexpectedMerge {
        route_id: RouteId,
        first: Headsign,
        second: Headsign,
    },

    /// A rule has no inputs besides its output.
    #[error("merge rule for route {route_id} has no inputs besides '{output}'")]
    EmptyRule { route_id: RouteId, output: String },

    /// Two rules of one route share two or more inputs, so a pair could
    /// match both.
    #[error("merge rules for route {route_id} overlap: '{first}' and '{second}' share {shared:?}")]
    OverlappingRules {
        route_id: RouteId,
        first: String,
        second: String,
        shared: Vec<String>,
    },
}
