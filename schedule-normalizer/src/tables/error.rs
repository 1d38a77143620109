//! Curated table error types.

use std::path::PathBuf;

use crate::domain::{DirectionId, RouteId};
use crate::merge::MergeError;
use crate::split::SplitError;

/// Errors that can occur when building or loading curated tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Table file could not be read
    #[error("failed to read table file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file is not valid JSON for the table format
    #[error("invalid table file: {0}")]
    Json(#[from] serde_json::Error),

    /// A merge rule is invalid
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// A direction spec is invalid
    #[error(transparent)]
    Split(#[from] SplitError),

    /// Two overrides for the same route+direction
    #[error("duplicate override for route {route_id} direction {direction}")]
    DuplicateOverride {
        route_id: RouteId,
        direction: DirectionId,
    },
}
