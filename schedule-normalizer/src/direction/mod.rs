//! Per-trip direction and headsign assignment.
//!
//! Every feed trip of an ordinary route becomes one canonical trip. Its
//! headsign comes from, in order of precedence: a cardinal word ("East"),
//! a curated per-direction override, or the canonicalized feed headsign.
//! Trips of split routes are left to [`crate::split`].

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{
    CanonicalTrip, CardinalDirection, DirectionId, Headsign, RawTrip, RouteId, RouteRecord,
};
use crate::split::SplitTable;
use crate::text::canonicalize;

/// Literal headsigns for a route+direction, bypassing the feed headsign.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    headsigns: HashMap<(RouteId, DirectionId), Headsign>,
}

impl OverrideTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the headsign for a route+direction, replacing any previous one.
    pub fn insert(&mut self, route_id: RouteId, direction: DirectionId, headsign: Headsign) {
        self.headsigns.insert((route_id, direction), headsign);
    }

    /// The override for a route+direction, if any.
    pub fn get(&self, route_id: RouteId, direction: DirectionId) -> Option<&Headsign> {
        self.headsigns.get(&(route_id, direction))
    }

    /// Iterate over every override, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (RouteId, DirectionId, &Headsign)> {
        self.headsigns
            .iter()
            .map(|((route, direction), headsign)| (*route, *direction, headsign))
    }

    /// Returns the number of overrides.
    pub fn len(&self) -> usize {
        self.headsigns.len()
    }

    /// Returns true if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.headsigns.is_empty()
    }
}

/// Builder for creating override tables.
#[derive(Debug, Default)]
pub struct OverrideTableBuilder {
    inner: OverrideTable,
}

impl OverrideTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text headsign.
    pub fn text(mut self, route_id: u64, direction: DirectionId, label: &str) -> Self {
        self.inner
            .insert(RouteId(route_id), direction, Headsign::text(label));
        self
    }

    /// Add a cardinal headsign.
    pub fn cardinal(mut self, route_id: u64, direction: DirectionId, cardinal: CardinalDirection) -> Self {
        self.inner
            .insert(RouteId(route_id), direction, Headsign::Cardinal(cardinal));
        self
    }

    /// Build the table.
    pub fn build(self) -> OverrideTable {
        self.inner
    }
}

/// Create the curated override table.
///
/// Route 89 runs between the same two terminals in both directions, so no
/// stop tells its directions apart; the feed direction id is trusted instead.
pub fn halifax_overrides() -> OverrideTable {
    OverrideTableBuilder::new()
        .text(89, DirectionId::ZERO, "Lacewood Term")
        .text(89, DirectionId::ONE, "Cobequid Term")
        .build()
}

/// Outcome of assigning a headsign to one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The route is split by stop sequence; the splitter decides.
    Deferred,
    /// One canonical trip for the raw trip.
    Assigned(CanonicalTrip),
}

/// Assigns directions and headsigns to raw trips.
#[derive(Debug, Clone, Copy)]
pub struct DirectionAssigner<'a> {
    overrides: &'a OverrideTable,
    splits: &'a SplitTable,
    default_direction: DirectionId,
}

impl<'a> DirectionAssigner<'a> {
    /// Creates an assigner. Trips without a feed direction id get
    /// `default_direction`.
    pub fn new(
        overrides: &'a OverrideTable,
        splits: &'a SplitTable,
        default_direction: DirectionId,
    ) -> Self {
        Self {
            overrides,
            splits,
            default_direction,
        }
    }

    /// Decide the direction and headsign of one trip.
    ///
    /// ```
    /// use schedule_normalizer::direction::{Assignment, DirectionAssigner, OverrideTable};
    /// use schedule_normalizer::domain::{DirectionId, Headsign, RawTrip, RouteId, RouteRecord};
    /// use schedule_normalizer::split::SplitTable;
    ///
    /// let (overrides, splits) = (OverrideTable::new(), SplitTable::new());
    /// let assigner = DirectionAssigner::new(&overrides, &splits, DirectionId::ZERO);
    ///
    /// let route = RouteRecord::new(RouteId(12), "12", "Downtown");
    /// let trip = RawTrip::new("t1", RouteId(12), Some(DirectionId::ONE), "12 TO DOWNTOWN VIA MAIN ST");
    /// let Assignment::Assigned(canonical) = assigner.assign_headsign(&route, &trip) else {
    ///     panic!("ordinary routes are never deferred");
    /// };
    /// assert_eq!(canonical.headsign, Headsign::text("Downtown"));
    /// assert_eq!(canonical.direction_id, DirectionId::ONE);
    /// ```
    pub fn assign_headsign(&self, route: &RouteRecord, trip: &RawTrip) -> Assignment {
        if self.splits.contains(route.id) {
            trace!(route_id = %route.id, trip_id = %trip.trip_id, "deferred to splitter");
            return Assignment::Deferred;
        }
        let direction = trip.direction_id.unwrap_or(self.default_direction);
        let headsign = self.headsign_for(route, direction, &trip.headsign);
        trace!(route_id = %route.id, trip_id = %trip.trip_id, %direction, %headsign, "assigned headsign");

        let mut canonical = CanonicalTrip::new(route.id, direction, headsign);
        canonical.stops = trip.stop_ids();
        canonical.source_trip_id = Some(trip.trip_id.clone());
        Assignment::Assigned(canonical)
    }

    fn headsign_for(&self, route: &RouteRecord, direction: DirectionId, raw: &str) -> Headsign {
        if let Some(cardinal) = CardinalDirection::parse(raw) {
            return Headsign::Cardinal(cardinal);
        }
        if let Some(headsign) = self.overrides.get(route.id, direction) {
            return headsign.clone();
        }
        Headsign::text(canonicalize(strip_short_name(raw, &route.short_name)))
    }
}

/// Remove the route short name from the front of a headsign, if it is there
/// as a whole word.
fn strip_short_name<'t>(headsign: &'t str, short_name: &str) -> &'t str {
    let trimmed = headsign.trim_start();
    if short_name.is_empty() {
        return trimmed;
    }
    let Some(prefix) = trimmed.get(..short_name.len()) else {
        return trimmed;
    };
    if !prefix.eq_ignore_ascii_case(short_name) {
        return trimmed;
    }
    let rest = &trimmed[short_name.len()..];
    match rest.chars().next() {
        None => rest,
        Some(c) if !c.is_alphanumeric() => rest.trim_start(),
        Some(_) => trimmed,
    }
}
