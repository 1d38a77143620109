//! Error types for the stop-sequence splitter.

use crate::domain::{DirectionId, RouteId, StopId};

/// Errors from building direction specs or classifying trips.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    /// The trip contains exclusive stops of both directions.
    #[error("trip {trip_id} on route {route_id} matches both directions: {stops:?}")]
    AmbiguousDirection {
        route_id: RouteId,
        trip_id: String,
        stops: Vec<StopId>,
    },

    /// The trip contains no exclusive stop of either direction.
    #[error("trip {trip_id} on route {route_id} matches neither direction: {stops:?}")]
    UnclassifiedTrip {
        route_id: RouteId,
        trip_id: String,
        stops: Vec<StopId>,
    },

    /// A stop is marked exclusive in both reference sequences.
    #[error("route {route_id}: stop {stop_id} is exclusive to both directions")]
    ExclusiveInBothDirections { route_id: RouteId, stop_id: StopId },

    /// A stop is exclusive to one direction but listed in the other.
    #[error("route {route_id}: stop {stop_id} is exclusive to direction {direction} but shared by the other direction")]
    ExclusiveStopShared {
        route_id: RouteId,
        direction: DirectionId,
        stop_id: StopId,
    },

    /// A reference sequence has nothing to classify with.
    #[error("route {route_id}: direction {direction} has no exclusive stops")]
    NoExclusiveTokens {
        route_id: RouteId,
        direction: DirectionId,
    },

    /// A route was registered twice.
    #[error("route {0} already has a direction spec")]
    DuplicateRoute(RouteId),
}
