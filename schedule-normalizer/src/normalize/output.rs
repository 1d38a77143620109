//! Normalized output records.

use serde::Serialize;

use crate::domain::{CanonicalTrip, DirectionId, Headsign, RouteId, RouteRecord, StopId};

/// A stop ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalStop {
    /// Numeric stop id
    pub id: u32,
    /// Rider-facing stop code
    pub code: String,
    /// Feed stop id after merged-id cleanup; trips refer to stops by this
    pub feed_id: StopId,
    pub name: String,
}

/// The merged headsign and canonical stop order of one route direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionSummary {
    pub route_id: RouteId,
    pub direction_id: DirectionId,
    pub headsign: Headsign,
    pub stops: Vec<StopId>,
}

/// The result of a normalization run.
///
/// Routes are sorted by id, stops by numeric id, trips by route, direction
/// and feed trip id (synthetic trips first), summaries by route and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalFeed {
    pub routes: Vec<RouteRecord>,
    pub stops: Vec<CanonicalStop>,
    pub trips: Vec<CanonicalTrip>,
    pub directions: Vec<DirectionSummary>,
}

impl CanonicalFeed {
    /// Trips of one route.
    pub fn trips_for(&self, route_id: RouteId) -> impl Iterator<Item = &CanonicalTrip> {
        self.trips.iter().filter(move |t| t.route_id == route_id)
    }

    /// Summary of one route direction, if the route has trips in it.
    pub fn direction(&self, route_id: RouteId, direction: DirectionId) -> Option<&DirectionSummary> {
        self.directions
            .iter()
            .find(|d| d.route_id == route_id && d.direction_id == direction)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
