//! Run-level error type.

use crate::domain::RouteId;
use crate::feed::ConversionError;
use crate::ids::IdError;
use crate::merge::MergeError;
use crate::split::SplitError;
use crate::tables::TableError;

/// Errors that stop a normalization run.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The feed export could not be converted
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A stop id has no numeric component
    #[error(transparent)]
    Id(#[from] IdError),

    /// Headsign variants of a route direction could not be merged
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// A trip of a split route could not be classified
    #[error(transparent)]
    Split(#[from] SplitError),

    /// The curated tables are invalid or unreadable
    #[error(transparent)]
    Table(#[from] TableError),

    /// A trip whose route has no record
    #[error("trip {trip_id} references route {route_id}, which has no record")]
    MissingRoute { trip_id: String, route_id: RouteId },
}
