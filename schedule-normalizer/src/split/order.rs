//! Canonical stop order for one route direction.
//!
//! Every trip of a direction contributes its visits; the canonical order is
//! a sequence merge of all of them. Where two stops are not related by any
//! trip, a caller-supplied comparison decides (reference sequence position
//! for split routes), then arrival time, then the order accumulated so far.

use std::cmp::Ordering;

use crate::domain::{ServiceTime, StopId, StopVisit};

/// Merge the visit lists of several trips into one stop order.
///
/// The trips are sorted first (by first arrival, then by their visits), so
/// the result does not depend on the order the feed listed them in.
///
/// ```
/// use std::cmp::Ordering;
/// use schedule_normalizer::domain::{StopId, StopVisit};
/// use schedule_normalizer::split::merge_stop_orders;
///
/// let a = vec![StopVisit::new("1"), StopVisit::new("2"), StopVisit::new("4")];
/// let b = vec![StopVisit::new("2"), StopVisit::new("3"), StopVisit::new("4")];
/// let order = merge_stop_orders(&[a, b], |_, _| Ordering::Equal);
/// let order: Vec<&str> = order.iter().map(StopId::as_str).collect();
/// assert_eq!(order, vec!["1", "2", "3", "4"]);
/// ```
pub fn merge_stop_orders<F>(trips: &[Vec<StopVisit>], compare_early: F) -> Vec<StopId>
where
    F: Fn(&StopId, &StopId) -> Ordering,
{
    let mut sorted: Vec<&Vec<StopVisit>> = trips.iter().collect();
    sorted.sort_by(|a, b| compare_trips(a, b));

    let mut merged: Vec<StopVisit> = Vec::new();
    for visits in sorted {
        merged = merge_two(&merged, visits, &compare_early);
    }
    merged.into_iter().map(|v| v.stop_id).collect()
}

fn first_arrival(visits: &[StopVisit]) -> Option<ServiceTime> {
    visits.iter().filter_map(|v| v.arrival).min()
}

fn compare_trips(a: &[StopVisit], b: &[StopVisit]) -> Ordering {
    first_arrival(a)
        .cmp(&first_arrival(b))
        .then_with(|| {
            a.iter()
                .map(|v| (&v.stop_id, v.arrival))
                .cmp(b.iter().map(|v| (&v.stop_id, v.arrival)))
        })
}

fn merge_two<F>(accumulated: &[StopVisit], next: &[StopVisit], compare_early: &F) -> Vec<StopVisit>
where
    F: Fn(&StopId, &StopId) -> Ordering,
{
    let mut out = Vec::with_capacity(accumulated.len() + next.len());
    let (mut i, mut j) = (0, 0);

    while i < accumulated.len() && j < next.len() {
        let (old, new) = (&accumulated[i], &next[j]);
        if old.stop_id == new.stop_id {
            out.push(old.clone());
            i += 1;
            j += 1;
        } else if contains_from(accumulated, i + 1, &new.stop_id) {
            // The new stop comes later in the accumulated order.
            out.push(old.clone());
            i += 1;
        } else if contains_from(next, j + 1, &old.stop_id) {
            out.push(new.clone());
            j += 1;
        } else if unrelated_goes_first(old, new, compare_early) {
            out.push(old.clone());
            i += 1;
        } else {
            out.push(new.clone());
            j += 1;
        }
    }
    out.extend_from_slice(&accumulated[i..]);
    out.extend_from_slice(&next[j..]);
    out
}

fn contains_from(visits: &[StopVisit], start: usize, stop_id: &StopId) -> bool {
    visits[start..].iter().any(|v| &v.stop_id == stop_id)
}

/// Whether the accumulated stop goes before the new one when no trip
/// relates them.
fn unrelated_goes_first<F>(old: &StopVisit, new: &StopVisit, compare_early: &F) -> bool
where
    F: Fn(&StopId, &StopId) -> Ordering,
{
    match compare_early(&old.stop_id, &new.stop_id) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => match (old.arrival, new.arrival) {
            (Some(a), Some(b)) if a != b => a < b,
            _ => true,
        },
    }
}
