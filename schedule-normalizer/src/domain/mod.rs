//! Domain types for schedule normalization.
//!
//! This module contains the validated records the normalizer works on:
//! resolved routes, feed stops, raw trips with their stop visits, and the
//! canonical trips produced for display. Types enforce their invariants at
//! construction time (a `DirectionId` is always 0 or 1, a `ServiceTime` is
//! always a well-formed offset).

mod direction;
mod route;
mod stop;
mod time;
mod trip;

pub use direction::{CardinalDirection, DirectionId, Headsign, InvalidDirectionId};
pub use route::{RouteId, RouteRecord};
pub use stop::{StopId, StopRecord, StopVisit};
pub use time::{ServiceTime, TimeError};
pub use trip::{CanonicalTrip, RawTrip};
