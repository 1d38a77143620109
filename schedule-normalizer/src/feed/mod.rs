//! Feed export input.
//!
//! This module handles the JSON feed export the normalizer reads: GTFS-style
//! routes, trips with inlined stop times, and stops.

mod convert;
mod types;

pub use convert::{ConversionError, ConvertedFeed, convert_feed, convert_trip};
pub use types::{FeedExport, FeedRoute, FeedStop, FeedStopTime, FeedTrip};
