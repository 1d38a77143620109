//! Stop-sequence splitting for routes whose feed directions can't be trusted.
//!
//! Some routes publish trips whose direction id and headsign don't tell the
//! two directions apart. For those, each direction gets a curated reference
//! sequence of stops. A trip is classified by which direction's *exclusive*
//! stops it visits, and the route is shown as exactly two synthetic trips,
//! one per direction, with curated headsigns.

mod error;
mod order;
mod reference;

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::{CanonicalTrip, DirectionId, Headsign, RawTrip, RouteId, StopId, StopVisit};

pub use error::SplitError;
pub use order::merge_stop_orders;
pub use reference::{MatchToken, ReferenceSequence, TokenKind};

/// The visits of one trip, assigned to a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedVisits {
    pub direction: DirectionId,
    pub visits: Vec<StopVisit>,
}

/// Curated direction data for one split route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSpec {
    route_id: RouteId,
    headsigns: [Headsign; 2],
    references: [ReferenceSequence; 2],
}

impl DirectionSpec {
    /// Creates a validated spec. Index 0 of each array is direction 0.
    ///
    /// Fails if a direction has no exclusive stop, or if a stop exclusive to
    /// one direction appears in the other direction's sequence at all.
    pub fn new(
        route_id: RouteId,
        headsigns: [Headsign; 2],
        references: [ReferenceSequence; 2],
    ) -> Result<Self, SplitError> {
        for direction in DirectionId::BOTH {
            if references[direction.index()].exclusive_stops().next().is_none() {
                return Err(SplitError::NoExclusiveTokens {
                    route_id,
                    direction,
                });
            }
        }
        let [zero, one] = &references;
        if let Some(stop_id) = zero
            .exclusive_stops()
            .find(|stop| one.exclusive_stops().any(|other| other == *stop))
        {
            return Err(SplitError::ExclusiveInBothDirections {
                route_id,
                stop_id: stop_id.clone(),
            });
        }
        for (direction, own, other) in [(DirectionId::ZERO, zero, one), (DirectionId::ONE, one, zero)] {
            if let Some(stop_id) = own
                .exclusive_stops()
                .find(|stop| other.position(stop).is_some())
            {
                return Err(SplitError::ExclusiveStopShared {
                    route_id,
                    direction,
                    stop_id: stop_id.clone(),
                });
            }
        }
        Ok(Self {
            route_id,
            headsigns,
            references,
        })
    }

    /// Route this spec belongs to.
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Curated headsign of a direction.
    pub fn headsign(&self, direction: DirectionId) -> &Headsign {
        &self.headsigns[direction.index()]
    }

    /// Reference sequence of a direction.
    pub fn reference(&self, direction: DirectionId) -> &ReferenceSequence {
        &self.references[direction.index()]
    }

    /// Decide which direction a trip travels in.
    ///
    /// Each direction scores the longest in-order run of its exclusive stops
    /// found in the trip. Exactly one direction must score.
    pub fn classify(&self, trip: &RawTrip) -> Result<DirectionId, SplitError> {
        let stops = trip.stop_ids();
        let scores = DirectionId::BOTH.map(|d| self.reference(d).exclusive_score(&stops));
        trace!(route_id = %self.route_id, trip_id = %trip.trip_id, ?scores, "classifying trip");

        match scores {
            [0, 0] => Err(SplitError::UnclassifiedTrip {
                route_id: self.route_id,
                trip_id: trip.trip_id.clone(),
                stops,
            }),
            [_, 0] => Ok(DirectionId::ZERO),
            [0, _] => Ok(DirectionId::ONE),
            _ => Err(SplitError::AmbiguousDirection {
                route_id: self.route_id,
                trip_id: trip.trip_id.clone(),
                stops,
            }),
        }
    }

    /// The two synthetic trips shown for this route, with no stops yet.
    pub fn split_trip(&self) -> [CanonicalTrip; 2] {
        DirectionId::BOTH
            .map(|d| CanonicalTrip::new(self.route_id, d, self.headsign(d).clone()))
    }

    /// Assign every visit of a trip to a direction, keeping their order.
    pub fn split_trip_stop(&self, trip: &RawTrip, direction: DirectionId) -> AssignedVisits {
        AssignedVisits {
            direction,
            visits: trip.stops.clone(),
        }
    }

    /// Classify a trip and assign its visits in one step.
    pub fn assign(&self, trip: &RawTrip) -> Result<AssignedVisits, SplitError> {
        let direction = self.classify(trip)?;
        debug!(route_id = %self.route_id, trip_id = %trip.trip_id, %direction, "split trip");
        Ok(self.split_trip_stop(trip, direction))
    }

    /// Order two stops by their position in a direction's reference sequence.
    ///
    /// Returns `Equal` unless both stops are in the sequence at different
    /// positions; the caller then falls back to its own ordering.
    pub fn compare_early(&self, direction: DirectionId, a: &StopId, b: &StopId) -> Ordering {
        let reference = self.reference(direction);
        match (reference.position(a), reference.position(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        }
    }
}

/// Direction specs keyed by route.
#[derive(Debug, Clone, Default)]
pub struct SplitTable {
    specs: HashMap<RouteId, DirectionSpec>,
}

impl SplitTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec. Each route may be registered once.
    pub fn insert(&mut self, spec: DirectionSpec) -> Result<(), SplitError> {
        if self.specs.contains_key(&spec.route_id) {
            return Err(SplitError::DuplicateRoute(spec.route_id));
        }
        self.specs.insert(spec.route_id, spec);
        Ok(())
    }

    /// Returns true if the route is split by stop sequence.
    pub fn contains(&self, route_id: RouteId) -> bool {
        self.specs.contains_key(&route_id)
    }

    /// The spec for a route, if registered.
    pub fn get(&self, route_id: RouteId) -> Option<&DirectionSpec> {
        self.specs.get(&route_id)
    }

    /// Iterate over every spec, in no particular order.
    pub fn specs(&self) -> impl Iterator<Item = &DirectionSpec> {
        self.specs.values()
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Route id of S14 (named route table).
const ROUTE_S14: RouteId = RouteId(100_114);

/// Build the curated split table.
pub fn halifax_splits() -> Result<SplitTable, SplitError> {
    let mut table = SplitTable::new();
    table.insert(DirectionSpec::new(
        ROUTE_S14,
        [Headsign::text("Mumford Term"), Headsign::text("Cunard Jr High")],
        [
            ReferenceSequence::new(vec![
                MatchToken::shared("8799"),
                MatchToken::exclusive("8370"),
                MatchToken::exclusive("7285"),
            ]),
            ReferenceSequence::new(vec![
                MatchToken::exclusive("8640"),
                MatchToken::exclusive("7187"),
                MatchToken::shared("8799"),
            ]),
        ],
    )?)?;
    Ok(table)
}
