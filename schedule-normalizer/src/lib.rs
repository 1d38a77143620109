//! Transit schedule normalizer.
//!
//! Turns a transit agency's schedule export into rider-facing data: clean
//! headsign and stop labels, one headsign per route direction, and reliable
//! directions for routes whose feed directions can't be trusted.

pub mod direction;
pub mod domain;
pub mod feed;
pub mod ids;
pub mod merge;
pub mod normalize;
pub mod split;
pub mod tables;
pub mod text;
