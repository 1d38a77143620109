//! Raw and canonical trip types.
//!
//! A `RawTrip` is what the feed says; a `CanonicalTrip` is what riders see.
//! Ordinary routes map one raw trip to one canonical trip. Routes registered
//! with the stop-sequence splitter instead produce exactly two synthetic
//! canonical trips, one per direction.

use serde::Serialize;

use super::{DirectionId, Headsign, RouteId, StopId, StopVisit};

/// A trip as provided by the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrip {
    /// Feed trip id, used in diagnostics
    pub trip_id: String,
    /// Resolved route id
    pub route_id: RouteId,
    /// Feed direction id; absent or unreliable for some routes
    pub direction_id: Option<DirectionId>,
    /// Free-text headsign as published
    pub headsign: String,
    /// Stops in visit order
    pub stops: Vec<StopVisit>,
}

impl RawTrip {
    /// Creates a trip with no stops.
    pub fn new(
        trip_id: impl Into<String>,
        route_id: RouteId,
        direction_id: Option<DirectionId>,
        headsign: impl Into<String>,
    ) -> Self {
        Self {
            trip_id: trip_id.into(),
            route_id,
            direction_id,
            headsign: headsign.into(),
            stops: Vec::new(),
        }
    }

    /// Builder-style setter for the visited stops.
    pub fn with_stops(mut self, stops: Vec<StopVisit>) -> Self {
        self.stops = stops;
        self
    }

    /// Stop ids in visit order.
    pub fn stop_ids(&self) -> Vec<StopId> {
        self.stops.iter().map(|v| v.stop_id.clone()).collect()
    }
}

/// A trip with its rider-facing direction and headsign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalTrip {
    /// Resolved route id
    pub route_id: RouteId,
    /// Direction of travel
    pub direction_id: DirectionId,
    /// Canonical label or cardinal direction
    pub headsign: Headsign,
    /// Stops assigned to this trip, in canonical order
    pub stops: Vec<StopId>,
    /// Feed trip this was derived from; `None` for synthetic split trips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_trip_id: Option<String>,
}

impl CanonicalTrip {
    /// Creates a canonical trip with no stops assigned yet.
    pub fn new(route_id: RouteId, direction_id: DirectionId, headsign: Headsign) -> Self {
        Self {
            route_id,
            direction_id,
            headsign,
            stops: Vec::new(),
            source_trip_id: None,
        }
    }

    /// Returns true if this trip was synthesized by the splitter.
    pub fn is_synthetic(&self) -> bool {
        self.source_trip_id.is_none()
    }
}
