//! End-to-end tests for whole-feed normalization.

use super::*;
use crate::domain::{CanonicalTrip, CardinalDirection, StopId};
use crate::merge::MergeError;
use crate::split::SplitError;

/// A small Halifax-like export: an ordinary route with headsign variants, a
/// cardinal loop, an overridden route and the split route S14.
const FIXTURE: &str = r#"{
    "routes": [
        {"route_id": "r1", "route_short_name": "1", "route_long_name": "* Spring Garden"},
        {"route_id": "r7", "route_short_name": "7", "route_long_name": "Robie"},
        {"route_id": "r89", "route_short_name": "89", "route_long_name": "Bedford"},
        {"route_id": "rs14", "route_short_name": "S14", "route_long_name": "School Special"}
    ],
    "trips": [
        {"trip_id": "t1a", "route_id": "r1", "direction_id": 0, "trip_headsign": "1 BRIDGE TERMINAL",
         "stop_times": [
            {"stop_id": "1000", "stop_sequence": 1, "arrival_time": "7:00:00"},
            {"stop_id": "1001_merged_4", "stop_sequence": 2, "arrival_time": "7:05:00"},
            {"stop_id": "1002", "stop_sequence": 3, "arrival_time": "7:10:00"}
         ]},
        {"trip_id": "t1b", "route_id": "r1", "direction_id": 0, "trip_headsign": "1 TO SCOTIA SQUARE",
         "stop_times": [
            {"stop_id": "1001", "stop_sequence": 2, "arrival_time": "8:05:00"},
            {"stop_id": "1000", "stop_sequence": 1, "arrival_time": "8:00:00"}
         ]},
        {"trip_id": "t1c", "route_id": "r1", "direction_id": 1, "trip_headsign": "Mumford Terminal",
         "stop_times": [
            {"stop_id": "1002", "arrival_time": "9:00:00"},
            {"stop_id": "1001", "arrival_time": "9:05:00"},
            {"stop_id": "1000", "arrival_time": "9:10:00"}
         ]},
        {"trip_id": "t7", "route_id": "r7", "direction_id": 0, "trip_headsign": "EAST",
         "stop_times": [{"stop_id": "1000"}, {"stop_id": "8799"}]},
        {"trip_id": "t89a", "route_id": "r89", "direction_id": 1, "trip_headsign": "89 BEDFORD",
         "stop_times": [{"stop_id": "8799"}]},
        {"trip_id": "t89b", "route_id": "r89", "trip_headsign": "89 BEDFORD",
         "stop_times": [{"stop_id": "8799"}]},
        {"trip_id": "s1", "route_id": "rs14", "direction_id": 0, "trip_headsign": "SCHOOL",
         "stop_times": [{"stop_id": "8799"}, {"stop_id": "8370"}, {"stop_id": "7285"}]},
        {"trip_id": "s2", "route_id": "rs14", "direction_id": 0, "trip_headsign": "SCHOOL",
         "stop_times": [{"stop_id": "8640"}, {"stop_id": "7187"}, {"stop_id": "8799"}]},
        {"trip_id": "s3", "route_id": "rs14", "trip_headsign": "SCHOOL",
         "stop_times": [{"stop_id": "8799"}, {"stop_id": "8370"}]}
    ],
    "stops": [
        {"stop_id": "8799", "stop_name": "Mumford Terminal"},
        {"stop_id": "1000", "stop_name": "BARRINGTON ST BEFORE SPRING GARDEN RD"},
        {"stop_id": "1001_merged_4", "stop_name": "Scotia Square (3)"},
        {"stop_id": "1002", "stop_name": "Civic Address 1234 Main St [AM ONLY]"},
        {"stop_id": "8370", "stop_name": "Dutch Village Rd"},
        {"stop_id": "7285", "stop_name": "Joseph Howe Dr"},
        {"stop_id": "8640", "stop_name": "Cunard Junior High"},
        {"stop_id": "7187", "stop_name": "Chebucto Rd"}
    ]
}"#;

fn fixture() -> FeedExport {
    serde_json::from_str(FIXTURE).unwrap()
}

fn normalizer() -> Normalizer {
    Normalizer::new(Tables::builtin().unwrap(), NormalizeConfig::default())
}

fn ids(stops: &[StopId]) -> Vec<&str> {
    stops.iter().map(StopId::as_str).collect()
}

fn trip_ids(feed: &CanonicalFeed, route_id: RouteId) -> Vec<Option<&str>> {
    feed.trips_for(route_id)
        .map(|t| t.source_trip_id.as_deref())
        .collect()
}

#[test]
fn canonical_trip_count() {
    let feed = normalizer().run(&fixture()).unwrap();

    // Nine feed trips; the three S14 trips become two synthetic trips.
    assert_eq!(feed.trips.len(), 8);
    assert_eq!(feed.trips_for(RouteId(1)).count(), 3);
    assert_eq!(feed.trips_for(RouteId(100_114)).count(), 2);
}

#[test]
fn routes_resolved_and_sorted() {
    let feed = normalizer().run(&fixture()).unwrap();

    let ids: Vec<RouteId> = feed.routes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RouteId(1), RouteId(7), RouteId(89), RouteId(100_114)]);
    assert_eq!(feed.routes[0].long_name, "Spring Garden");
    assert_eq!(feed.routes[3].short_name, "S14");
}

#[test]
fn ordinary_trips_keep_their_own_headsigns() {
    let feed = normalizer().run(&fixture()).unwrap();

    let headsigns: Vec<String> = feed
        .trips_for(RouteId(1))
        .map(|t| t.headsign.to_string())
        .collect();
    assert_eq!(headsigns, vec!["Bridge Term", "Scotia Sq", "Mumford Term"]);
    assert_eq!(
        trip_ids(&feed, RouteId(1)),
        vec![Some("t1a"), Some("t1b"), Some("t1c")]
    );
}

#[test]
fn direction_summary_merges_headsigns() {
    let feed = normalizer().run(&fixture()).unwrap();

    let outbound = feed.direction(RouteId(1), DirectionId::ZERO).unwrap();
    assert_eq!(outbound.headsign, Headsign::text("Bridge Term"));
    assert_eq!(ids(&outbound.stops), vec!["1000", "1001", "1002"]);

    let inbound = feed.direction(RouteId(1), DirectionId::ONE).unwrap();
    assert_eq!(inbound.headsign, Headsign::text("Mumford Term"));
    assert_eq!(ids(&inbound.stops), vec!["1002", "1001", "1000"]);
}

#[test]
fn cardinal_and_override_headsigns() {
    let feed = normalizer().run(&fixture()).unwrap();

    let loop_trip = feed.trips_for(RouteId(7)).next().unwrap();
    assert_eq!(loop_trip.headsign, Headsign::Cardinal(CardinalDirection::East));

    let headsigns: Vec<(DirectionId, String)> = feed
        .trips_for(RouteId(89))
        .map(|t| (t.direction_id, t.headsign.to_string()))
        .collect();
    assert_eq!(
        headsigns,
        vec![
            (DirectionId::ZERO, "Lacewood Term".to_string()),
            (DirectionId::ONE, "Cobequid Term".to_string()),
        ]
    );
}

#[test]
fn split_route_becomes_two_synthetic_trips() {
    let feed = normalizer().run(&fixture()).unwrap();

    let trips: Vec<&CanonicalTrip> = feed.trips_for(RouteId(100_114)).collect();
    assert!(trips.iter().all(|t| t.is_synthetic()));
    assert_eq!(trips[0].direction_id, DirectionId::ZERO);
    assert_eq!(trips[0].headsign, Headsign::text("Mumford Term"));
    assert_eq!(ids(&trips[0].stops), vec!["8799", "8370", "7285"]);
    assert_eq!(trips[1].direction_id, DirectionId::ONE);
    assert_eq!(trips[1].headsign, Headsign::text("Cunard Jr High"));
    assert_eq!(ids(&trips[1].stops), vec!["8640", "7187", "8799"]);

    let summary = feed.direction(RouteId(100_114), DirectionId::ONE).unwrap();
    assert_eq!(summary.stops, trips[1].stops);
}

#[test]
fn split_route_with_one_direction_still_has_two_trips() {
    let mut export = fixture();
    export.trips.retain(|t| t.trip_id != "s2");
    let feed = normalizer().run(&export).unwrap();

    let trips: Vec<&CanonicalTrip> = feed.trips_for(RouteId(100_114)).collect();
    assert_eq!(trips.len(), 2);
    assert!(trips[1].stops.is_empty());
}

#[test]
fn split_route_without_trips_still_has_two_trips() {
    let mut export = fixture();
    export.trips.retain(|t| t.route_id != "rs14");
    let feed = normalizer().run(&export).unwrap();

    let trips: Vec<&CanonicalTrip> = feed.trips_for(RouteId(100_114)).collect();
    assert_eq!(trips.len(), 2);
    assert!(trips.iter().all(|t| t.is_synthetic() && t.stops.is_empty()));
    assert_eq!(trips[0].headsign, Headsign::text("Mumford Term"));
    assert_eq!(trips[1].headsign, Headsign::text("Cunard Jr High"));
    assert!(feed.direction(RouteId(100_114), DirectionId::ZERO).is_some());
}

#[test]
fn split_route_absent_from_feed_has_no_trips() {
    let mut export = fixture();
    export.trips.retain(|t| t.route_id != "rs14");
    export.routes.retain(|r| r.route_id != "rs14");
    let feed = normalizer().run(&export).unwrap();

    assert_eq!(feed.trips_for(RouteId(100_114)).count(), 0);
}

#[test]
fn stops_cleaned_and_sorted() {
    let feed = normalizer().run(&fixture()).unwrap();

    let ids: Vec<u32> = feed.stops.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1000, 1001, 1002, 7187, 7285, 8370, 8640, 8799]);
    assert_eq!(feed.stops[0].name, "Barrington St / Spring Garden Rd");
    assert_eq!(feed.stops[1].name, "Scotia Sq");
    assert_eq!(feed.stops[1].feed_id, StopId::new("1001"));
    assert_eq!(feed.stops[2].name, "1234 Main St");
    assert_eq!(feed.stops[2].code, "1002");
}

#[test]
fn stop_names_kept_when_cleaning_disabled() {
    let config = NormalizeConfig::new(DirectionId::ZERO, false, None);
    let feed = Normalizer::new(Tables::builtin().unwrap(), config)
        .run(&fixture())
        .unwrap();
    assert_eq!(feed.stops[1].name, "Scotia Square (3)");
}

#[test]
fn default_direction_applies_to_untagged_trips() {
    let config = NormalizeConfig::new(DirectionId::ONE, true, None);
    let feed = Normalizer::new(Tables::builtin().unwrap(), config)
        .run(&fixture())
        .unwrap();

    let directions: Vec<DirectionId> = feed.trips_for(RouteId(89)).map(|t| t.direction_id).collect();
    assert_eq!(directions, vec![DirectionId::ONE, DirectionId::ONE]);
    assert!(feed.direction(RouteId(89), DirectionId::ZERO).is_none());
}

#[test]
fn output_independent_of_trip_order() {
    let forward = normalizer().run(&fixture()).unwrap();

    let mut export = fixture();
    export.trips.reverse();
    export.stops.reverse();
    let reversed = normalizer().run(&export).unwrap();

    assert_eq!(forward, reversed);
}

#[test]
fn unmergeable_variants_are_fatal() {
    let mut export = fixture();
    export.routes.push(crate::feed::FeedRoute {
        route_id: "r3".into(),
        route_short_name: "3".into(),
        route_long_name: String::new(),
    });
    for (id, headsign) in [("t3a", "Lacewood Terminal"), ("t3b", "Mumford Terminal")] {
        export.trips.push(crate::feed::FeedTrip {
            trip_id: id.into(),
            route_id: "r3".into(),
            direction_id: Some(0),
            trip_headsign: headsign.into(),
            stop_times: vec![],
        });
    }

    let err = normalizer().run(&export).unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Merge(MergeError::UnexpectedMerge { route_id: RouteId(3), .. })
    ));
    assert_eq!(
        err.to_string(),
        "unexpected headsign merge on route 3: 'Lacewood Term' and 'Mumford Term'"
    );
}

#[test]
fn contradictory_split_trip_is_fatal() {
    let mut export = fixture();
    let trip = export.trips.iter_mut().find(|t| t.trip_id == "s3").unwrap();
    trip.stop_times[0].stop_id = "8640".into();

    let err = normalizer().run(&export).unwrap_err();
    match err {
        NormalizeError::Split(SplitError::AmbiguousDirection { route_id, trip_id, stops }) => {
            assert_eq!(route_id, RouteId(100_114));
            assert_eq!(trip_id, "s3");
            assert_eq!(ids(&stops), vec!["8640", "8370"]);
        }
        other => panic!("expected ambiguous direction, got {other:?}"),
    }
}

#[test]
fn unclassifiable_split_trip_is_fatal() {
    let mut export = fixture();
    let trip = export.trips.iter_mut().find(|t| t.trip_id == "s3").unwrap();
    trip.stop_times.truncate(1);

    assert!(matches!(
        normalizer().run(&export),
        Err(NormalizeError::Split(SplitError::UnclassifiedTrip { .. }))
    ));
}

#[test]
fn bad_stop_id_is_fatal() {
    let mut export = fixture();
    export.stops.push(crate::feed::FeedStop {
        stop_id: "depot".into(),
        stop_name: "Depot".into(),
    });
    assert!(matches!(
        normalizer().run(&export),
        Err(NormalizeError::Id(IdError::UnexpectedStopId(_)))
    ));
}

#[test]
fn conversion_errors_propagate() {
    let mut export = fixture();
    export.trips[0].direction_id = Some(4);
    assert!(matches!(
        normalizer().run(&export),
        Err(NormalizeError::Conversion(_))
    ));
}

#[test]
fn empty_feed() {
    let feed = normalizer().run(&FeedExport::default()).unwrap();
    assert_eq!(feed, CanonicalFeed::default());
}

#[test]
fn json_output_shape() {
    let feed = normalizer().run(&fixture()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&feed.to_json().unwrap()).unwrap();

    let first = &value["trips"][0];
    assert_eq!(first["route_id"], 1);
    assert_eq!(first["direction_id"], 0);
    assert_eq!(first["headsign"]["text"], "Bridge Term");
    assert_eq!(first["source_trip_id"], "t1a");

    let synthetic = value["trips"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["route_id"] == 100_114)
        .unwrap();
    assert!(synthetic.get("source_trip_id").is_none());

    let cardinal = value["trips"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["route_id"] == 7)
        .unwrap();
    assert_eq!(cardinal["headsign"]["cardinal"], "EAST");
}

#[test]
fn from_config_uses_builtin_tables() {
    let normalizer = Normalizer::from_config(NormalizeConfig::default()).unwrap();
    assert_eq!(normalizer.tables().splits.len(), 1);
    assert!(normalizer.config().clean_stop_names);
}
