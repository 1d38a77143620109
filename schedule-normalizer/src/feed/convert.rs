//! Conversion from feed DTOs to domain types.
//!
//! Resolves route ids from short names, cleans merged stop ids, parses
//! direction ids and arrival times, and orders stop visits.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{
    DirectionId, InvalidDirectionId, RawTrip, RouteId, RouteRecord, ServiceTime, StopId,
    StopRecord, StopVisit, TimeError,
};
use crate::ids::{self, IdError};

use super::types::{FeedExport, FeedStopTime, FeedTrip};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// A route or stop identifier could not be resolved
    #[error(transparent)]
    Id(#[from] IdError),

    /// A trip names a route the export does not contain
    #[error("trip {trip_id} references unknown route {route_id}")]
    UnknownRoute { trip_id: String, route_id: String },

    /// Direction id other than 0 or 1
    #[error("trip {trip_id}: {source}")]
    InvalidDirection {
        trip_id: String,
        #[source]
        source: InvalidDirectionId,
    },

    /// Arrival time that is not H:MM:SS
    #[error("trip {trip_id} at stop {stop_id}: {source}")]
    InvalidTime {
        trip_id: String,
        stop_id: String,
        #[source]
        source: TimeError,
    },
}

/// A feed export converted to domain records.
#[derive(Debug, Clone, Default)]
pub struct ConvertedFeed {
    /// Routes sorted by id; feed routes sharing a short name collapse to one.
    pub routes: Vec<RouteRecord>,
    /// Trips in feed order.
    pub trips: Vec<RawTrip>,
    /// Stops sorted by id; merged duplicates collapse to the first.
    pub stops: Vec<StopRecord>,
}

/// Convert a feed export to domain types.
pub fn convert_feed(feed: &FeedExport) -> Result<ConvertedFeed, ConversionError> {
    let mut route_ids: HashMap<&str, RouteId> = HashMap::with_capacity(feed.routes.len());
    let mut routes: BTreeMap<RouteId, RouteRecord> = BTreeMap::new();
    for route in &feed.routes {
        let id = ids::route_id(&route.route_short_name)?;
        route_ids.insert(route.route_id.as_str(), id);
        routes.entry(id).or_insert_with(|| {
            RouteRecord::new(
                id,
                ids::route_short_name(&route.route_short_name),
                ids::route_long_name(&route.route_long_name),
            )
        });
    }

    let trips = feed
        .trips
        .iter()
        .map(|trip| convert_trip(trip, &route_ids))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stops: BTreeMap<StopId, StopRecord> = BTreeMap::new();
    for stop in &feed.stops {
        let id = StopId::new(ids::clean_merged_id(&stop.stop_id));
        stops.entry(id.clone()).or_insert_with(|| StopRecord {
            id,
            name: stop.stop_name.clone(),
        });
    }

    debug!(
        routes = routes.len(),
        trips = trips.len(),
        stops = stops.len(),
        "converted feed"
    );
    Ok(ConvertedFeed {
        routes: routes.into_values().collect(),
        trips,
        stops: stops.into_values().collect(),
    })
}

/// Convert a single trip, resolving its route through `route_ids`.
pub fn convert_trip(
    trip: &FeedTrip,
    route_ids: &HashMap<&str, RouteId>,
) -> Result<RawTrip, ConversionError> {
    let route_id = *route_ids
        .get(trip.route_id.as_str())
        .ok_or_else(|| ConversionError::UnknownRoute {
            trip_id: trip.trip_id.clone(),
            route_id: trip.route_id.clone(),
        })?;

    let direction_id = trip
        .direction_id
        .map(DirectionId::parse)
        .transpose()
        .map_err(|source| ConversionError::InvalidDirection {
            trip_id: trip.trip_id.clone(),
            source,
        })?;

    let mut stop_times: Vec<&FeedStopTime> = trip.stop_times.iter().collect();
    if stop_times.iter().all(|st| st.stop_sequence.is_some()) {
        stop_times.sort_by_key(|st| st.stop_sequence);
    }

    let stops = stop_times
        .into_iter()
        .map(|st| convert_stop_time(&trip.trip_id, st))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawTrip::new(&trip.trip_id, route_id, direction_id, &trip.trip_headsign).with_stops(stops))
}

fn convert_stop_time(trip_id: &str, stop_time: &FeedStopTime) -> Result<StopVisit, ConversionError> {
    let stop_id = StopId::new(ids::clean_merged_id(&stop_time.stop_id));
    let arrival = match stop_time.arrival_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(ServiceTime::parse(text).map_err(|source| {
            ConversionError::InvalidTime {
                trip_id: trip_id.to_owned(),
                stop_id: stop_time.stop_id.clone(),
                source,
            }
        })?),
    };
    Ok(StopVisit { stop_id, arrival })
}
