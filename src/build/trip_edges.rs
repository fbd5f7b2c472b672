//! Scheduled-edge emission from timetable entries.

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::model::{Edge, TimetableEntry};
use crate::{SECONDS_PER_DAY, Time};

/// Emit one timetabled edge per consecutive stop pair of every trip.
///
/// Entries referencing stops outside the canonical set are dropped.
/// Call order within a trip follows the sequence index, not the
/// incoming record order. A trip with fewer than two remaining
/// entries produces no edges.
pub(crate) fn scheduled_edges(
    known_stops: impl Fn(&str) -> bool,
    entries: Vec<TimetableEntry>,
) -> Vec<Edge> {
    let total = entries.len();
    let entries: Vec<TimetableEntry> = entries
        .into_iter()
        .filter(|entry| known_stops(&entry.stop_id))
        .collect();
    let dropped = total - entries.len();
    if dropped > 0 {
        debug!("Dropped {dropped} timetable entries referencing unknown stops");
    }

    let mut trips: HashMap<String, Vec<TimetableEntry>> = HashMap::new();
    for entry in entries {
        trips.entry(entry.trip_id.clone()).or_default().push(entry);
    }
    let mut groups: Vec<Vec<TimetableEntry>> = trips.into_iter().map(|(_, g)| g).collect();
    for group in &mut groups {
        group.sort_by_key(|entry| entry.sequence);
    }

    // Each trip is an independent edge run; collect is the join.
    groups.into_par_iter().flat_map_iter(trip_run).collect()
}

fn trip_run(group: Vec<TimetableEntry>) -> Vec<Edge> {
    group
        .iter()
        .tuple_windows()
        .map(|(current, next)| {
            let from = current.departure_secs();
            let to = next.departure_secs();
            // A negative delta is an overnight continuation of the trip.
            let travel: Time = if to >= from {
                to - from
            } else {
                to + SECONDS_PER_DAY - from
            };
            Edge::scheduled(&current.stop_id, &next.stop_id, travel, &current.trip_id, from)
        })
        .collect()
}
