//! Curated Halifax Transit merge rules.

use super::{MergeError, MergeTable, MergeTableBuilder};

/// Route id of 9A (letter suffix a).
const ROUTE_9A: u64 = 1_000_009;
/// Route id of 9B (letter suffix b).
const ROUTE_9B: u64 = 2_000_009;

/// Build the curated merge table.
///
/// Each rule lists the destination variants seen on one direction of a
/// route and the label riders should see for all of them.
pub fn halifax_merge_rules() -> Result<MergeTable, MergeError> {
    MergeTableBuilder::new()
        .rule(1, &["Bridge Term", "Scotia Sq"], "Bridge Term")
        .rule(2, &["Lacewood Term", "Mumford Term", "Water St Term"], "Water St Term")
        .rule(4, &["Lacewood Term", "Mumford Term", "Water St Term"], "Water St Term")
        .rule(5, &["Mumford Term", "Water St Term"], "Water St Term")
        .rule(6, &["Mumford Term", "Water St Term"], "Water St Term")
        .rule(9, &["Pt Pleasant", "Tower Rd Loop"], "Pt Pleasant")
        .rule(ROUTE_9A, &["Mumford Term", "Downtown"], "Downtown")
        .rule(ROUTE_9B, &["Fotherby", "Dentith", "Mumford Term", "Downtown"], "Downtown")
        .keyed_rule(10, "to_dalhousie", &["Bridge Term", "Tacoma Ctr"], "Dalhousie")
        .keyed_rule(
            10,
            "to_westphal",
            &["Bridge Term", "Micmac Term", "Scotia Sq"],
            "Westphal",
        )
        .keyed_rule(14, "to_downtown", &["Mumford Term"], "Scotia Sq")
        .keyed_rule(14, "to_leiblin_park", &["Dentith", "Mumford Term"], "Leiblin Pk")
        .rule(15, &["Mumford Term"], "Bayers Rd")
        .rule(18, &["Mt St Vincent", "Universities"], "St Mary's")
        .rule(20, &["Mumford Term"], "Downtown")
        .rule(21, &["Lacewood Term"], "Downtown")
        .rule(22, &["Ragged Lk"], "Exhibition Pk")
        .rule(23, &["Mumford Term"], "Downtown")
        .rule(33, &["Lacewood Term"], "Summer St")
        .rule(41, &["Scotia Sq"], "Bridge Term")
        .rule(51, &["Ocean Breeze"], "Burnside")
        .keyed_rule(
            52,
            "to_burnside",
            &["Burnside Garage", "Ilsley", "Lacewood Term", "Scotia Sq"],
            "Burnside",
        )
        .keyed_rule(52, "to_bayers_lake", &["Bridge Term"], "Bayers Lk")
        .rule(53, &["Bridge Term"], "Summer St")
        .rule(58, &["Penhorn Term"], "Bridge Term")
        .keyed_rule(
            59,
            "to_bridge",
            &["Summer St", "Portland Hls Term", "Penhorn Term"],
            "Bridge Term",
        )
        .keyed_rule(59, "to_colby", &["Portland Hls Term"], "Colby")
        .rule(60, &["Heritage Hls"], "Eastern Passage")
        .keyed_rule(
            61,
            "to_downtown",
            &["Bridge Term", "Portland Hls Term", "Montague Rd"],
            "Scotia Sq",
        )
        .keyed_rule(61, "to_north_preston", &["Auburn", "Auburn - N Preston"], "N Preston")
        .rule(66, &["Highfield Term", "Penhorn Term"], "Cobequid Term")
        .rule(68, &["Summer St"], "Bridge Term")
        .rule(72, &["Bus Garage"], "Dartmouth Xing")
        .rule(78, &["Mt Edward"], "Woodside Ferry")
        .rule(79, &["Cole Harbour"], "Woodside Ferry")
        .rule(80, &["Cobequid Term", "Sunnyside"], "Downtown")
        .rule(82, &["Cobequid Term"], "Water St Term")
        .rule(320, &["Bridge Term"], "Downtown Hfx")
        .rule(330, &["Sheldrake Lk", "Tantallon"], "Sheldrake Lk & Tantallon")
        .rule(370, &["Micmac Term"], "Downtown Hfx")
        .build()
}
