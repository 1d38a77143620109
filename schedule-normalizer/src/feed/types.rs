//! Feed export DTOs.
//!
//! These types map directly to the JSON feed export, which uses GTFS field
//! names. Optional GTFS fields are `Option` or defaulted, because exports
//! omit them rather than sending nulls.

use serde::{Deserialize, Serialize};

/// A complete feed export: routes, trips with their stop times, and stops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedExport {
    #[serde(default)]
    pub routes: Vec<FeedRoute>,
    #[serde(default)]
    pub trips: Vec<FeedTrip>,
    #[serde(default)]
    pub stops: Vec<FeedStop>,
}

/// A GTFS route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRoute {
    /// Feed route id; only used to link trips to routes.
    pub route_id: String,

    /// Rider-facing route number or code ("52", "S14", "9A").
    pub route_short_name: String,

    #[serde(default)]
    pub route_long_name: String,
}

/// A GTFS trip with its stop times inlined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedTrip {
    pub trip_id: String,

    /// Feed route id of the route this trip belongs to.
    pub route_id: String,

    /// 0 or 1; missing for some routes.
    #[serde(default)]
    pub direction_id: Option<u8>,

    #[serde(default)]
    pub trip_headsign: String,

    #[serde(default)]
    pub stop_times: Vec<FeedStopTime>,
}

/// One stop time of a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStopTime {
    pub stop_id: String,

    /// Position in the trip. When every stop time has one, visits are
    /// ordered by it; otherwise file order is kept.
    #[serde(default)]
    pub stop_sequence: Option<u32>,

    /// "H:MM:SS", may exceed 24:00:00.
    #[serde(default)]
    pub arrival_time: Option<String>,
}

/// A GTFS stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStop {
    pub stop_id: String,
    pub stop_name: String,
}
