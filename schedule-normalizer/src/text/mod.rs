//! Text canonicalization for headsigns and stop names.
//!
//! Feed text arrives in inconsistent case with route numbers, routing
//! descriptions and service notes mixed in. [`canonicalize`] reduces a
//! headsign to its destination label; [`clean_stop_name`] tidies a stop name.
//! Both produce the same abbreviations, so a label cleaned once compares
//! equal wherever it is used (merge rules, overrides, output).

pub mod clean;
mod headsign;
mod stop_name;

pub use headsign::canonicalize;
pub use stop_name::clean_stop_name;
