//! Whole-feed normalization.
//!
//! The normalizer converts a feed export to domain records, gives every trip
//! a direction and headsign, splits the routes registered in the split table
//! into two synthetic trips, and summarizes each route direction with one
//! merged headsign and one canonical stop order. Any fatal condition stops
//! the run; there is no partial output.

mod config;
mod error;
mod output;

#[cfg(test)]
mod normalize_tests;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::direction::{Assignment, DirectionAssigner};
use crate::domain::{DirectionId, Headsign, RouteId, RouteRecord, StopRecord, StopVisit};
use crate::feed::{FeedExport, convert_feed};
use crate::ids::{self, IdError};
use crate::split::merge_stop_orders;
use crate::tables::Tables;
use crate::text::clean_stop_name;

pub use config::{NormalizeConfig, TABLES_ENV};
pub use error::NormalizeError;
pub use output::{CanonicalFeed, CanonicalStop, DirectionSummary};

/// Trips of one ordinary route direction, collected for summarizing.
#[derive(Debug, Default)]
struct DirectionTrips {
    headsigns: Vec<Headsign>,
    visits: Vec<Vec<StopVisit>>,
}

/// Runs normalization over whole feeds with one set of tables.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tables: Tables,
    config: NormalizeConfig,
}

impl Normalizer {
    /// Create a normalizer. `config.tables_path` is ignored; the given
    /// tables are used as they are.
    pub fn new(tables: Tables, config: NormalizeConfig) -> Self {
        Self { tables, config }
    }

    /// Create a normalizer with the tables the configuration selects.
    pub fn from_config(config: NormalizeConfig) -> Result<Self, NormalizeError> {
        let tables = config.load_tables()?;
        Ok(Self::new(tables, config))
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize a feed export.
    ///
    /// Ordinary routes keep one canonical trip per feed trip. Split routes
    /// get exactly two synthetic trips whose stops are the canonical order
    /// of their direction.
    pub fn run(&self, feed: &FeedExport) -> Result<CanonicalFeed, NormalizeError> {
        let converted = convert_feed(feed)?;
        let routes: HashMap<RouteId, &RouteRecord> =
            converted.routes.iter().map(|route| (route.id, route)).collect();
        let assigner = DirectionAssigner::new(
            &self.tables.overrides,
            &self.tables.splits,
            self.config.default_direction,
        );

        let mut trips = Vec::with_capacity(converted.trips.len());
        let mut ordinary: BTreeMap<(RouteId, DirectionId), DirectionTrips> = BTreeMap::new();
        // Every split route in the feed gets its two synthetic trips, even
        // with no trips to classify.
        let mut split: BTreeMap<RouteId, [Vec<Vec<StopVisit>>; 2]> = converted
            .routes
            .iter()
            .filter(|route| self.tables.splits.contains(route.id))
            .map(|route| (route.id, Default::default()))
            .collect();

        for raw in &converted.trips {
            let route = routes
                .get(&raw.route_id)
                .ok_or_else(|| NormalizeError::MissingRoute {
                    trip_id: raw.trip_id.clone(),
                    route_id: raw.route_id,
                })?;

            match assigner.assign_headsign(route, raw) {
                Assignment::Assigned(trip) => {
                    let group = ordinary
                        .entry((trip.route_id, trip.direction_id))
                        .or_default();
                    group.headsigns.push(trip.headsign.clone());
                    group.visits.push(raw.stops.clone());
                    trips.push(trip);
                }
                Assignment::Deferred => {
                    if let Some(spec) = self.tables.splits.get(route.id) {
                        let assigned = spec.assign(raw)?;
                        split.entry(route.id).or_default()[assigned.direction.index()]
                            .push(assigned.visits);
                    }
                }
            }
        }

        let mut directions = Vec::with_capacity(ordinary.len() + 2 * split.len());
        for (&(route_id, direction_id), group) in &ordinary {
            let Some(headsign) = self
                .tables
                .merge
                .resolve_variants(route_id, &group.headsigns)?
            else {
                continue;
            };
            debug!(%route_id, %direction_id, %headsign, variants = group.headsigns.len(), "merged headsigns");
            directions.push(DirectionSummary {
                route_id,
                direction_id,
                headsign,
                stops: merge_stop_orders(&group.visits, |_, _| Ordering::Equal),
            });
        }

        for (&route_id, visits) in &split {
            let Some(spec) = self.tables.splits.get(route_id) else {
                continue;
            };
            for (mut trip, visits) in spec.split_trip().into_iter().zip(visits) {
                let direction_id = trip.direction_id;
                trip.stops =
                    merge_stop_orders(visits, |a, b| spec.compare_early(direction_id, a, b));
                debug!(%route_id, %direction_id, trips = visits.len(), stops = trip.stops.len(), "split route direction");
                directions.push(DirectionSummary {
                    route_id,
                    direction_id,
                    headsign: trip.headsign.clone(),
                    stops: trip.stops.clone(),
                });
                trips.push(trip);
            }
        }

        trips.sort_by(|a, b| {
            (a.route_id, a.direction_id, &a.source_trip_id).cmp(&(
                b.route_id,
                b.direction_id,
                &b.source_trip_id,
            ))
        });
        directions.sort_by_key(|summary| (summary.route_id, summary.direction_id));

        let mut stops = converted
            .stops
            .iter()
            .map(|stop| self.canonical_stop(stop))
            .collect::<Result<Vec<_>, _>>()?;
        stops.sort_by(|a, b| (a.id, &a.feed_id).cmp(&(b.id, &b.feed_id)));

        info!(
            routes = converted.routes.len(),
            stops = stops.len(),
            trips = trips.len(),
            split_routes = split.len(),
            "normalized feed"
        );
        Ok(CanonicalFeed {
            routes: converted.routes,
            stops,
            trips,
            directions,
        })
    }

    fn canonical_stop(&self, stop: &StopRecord) -> Result<CanonicalStop, IdError> {
        let name = if self.config.clean_stop_names {
            clean_stop_name(&stop.name)
        } else {
            stop.name.clone()
        };
        Ok(CanonicalStop {
            id: ids::stop_id(stop.id.as_str())?,
            code: ids::stop_code(stop.id.as_str())?,
            feed_id: stop.id.clone(),
            name,
        })
    }
}
