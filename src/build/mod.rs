//! Builds the routable graph from merged provider records.
//!
//! Scheduled edges come from consecutive timetable calls within a
//! trip; pedestrian edges from stop proximity. Both emission phases
//! run over the rayon pool into private buffers and are merged into
//! the graph single-threaded, so the graph is only handed out after
//! construction fully joins.

mod config;
mod trip_edges;
mod walk_edges;

pub use config::GraphConfig;

use hashbrown::{HashMap, HashSet};
use log::{debug, info};

use crate::error::Error;
use crate::model::{Edge, Stop, TimetableEntry, TransitGraph};

/// Creates the routable graph from stops and timetable entries.
///
/// Stops are deduplicated by identifier (first occurrence wins) and
/// timetable entries referencing unknown stops are dropped; neither
/// is fatal. Ingestion-level validation happens upstream.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if the configuration is not
/// strictly positive and finite.
pub fn build_graph(
    stops: Vec<Stop>,
    entries: Vec<TimetableEntry>,
    config: &GraphConfig,
) -> Result<TransitGraph, Error> {
    validate_config(config)?;

    let stops = dedup_stops(stops);
    info!(
        "Building graph from {} stops and {} timetable entries",
        stops.len(),
        entries.len()
    );

    let mut graph = TransitGraph::new();
    for stop in &stops {
        graph.add_stop(stop);
    }

    let by_id: HashMap<&str, &Stop> = stops
        .iter()
        .map(|stop| (stop.stop_id.as_str(), stop))
        .collect();

    let scheduled = trip_edges::scheduled_edges(|id| by_id.contains_key(id), entries);
    info!("Emitted {} scheduled edges", scheduled.len());
    insert_edges(&mut graph, &by_id, scheduled);

    let walking = walk_edges::walking_edges(&stops, config);
    info!("Emitted {} walking edges", walking.len());
    insert_edges(&mut graph, &by_id, walking);

    info!(
        "Graph ready: {} stops, {} edges",
        graph.stop_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn insert_edges(graph: &mut TransitGraph, by_id: &HashMap<&str, &Stop>, edges: Vec<Edge>) {
    for edge in edges {
        let (Some(from), Some(to)) = (by_id.get(edge.from.as_str()), by_id.get(edge.to.as_str()))
        else {
            continue;
        };
        graph.add_edge(from, to, edge);
    }
}

fn dedup_stops(stops: Vec<Stop>) -> Vec<Stop> {
    let total = stops.len();
    let mut seen = HashSet::with_capacity(total);
    let stops: Vec<Stop> = stops
        .into_iter()
        .filter(|stop| seen.insert(stop.stop_id.clone()))
        .collect();
    let dropped = total - stops.len();
    if dropped > 0 {
        debug!("Dropped {dropped} duplicate stops");
    }
    stops
}

fn validate_config(config: &GraphConfig) -> Result<(), Error> {
    if !config.walking_radius.is_finite() || config.walking_radius <= 0.0 {
        return Err(Error::InvalidData(format!(
            "walking radius must be positive, got {}",
            config.walking_radius
        )));
    }
    if !config.walking_speed.is_finite() || config.walking_speed <= 0.0 {
        return Err(Error::InvalidData(format!(
            "walking speed must be positive, got {}",
            config.walking_speed
        )));
    }
    Ok(())
}
