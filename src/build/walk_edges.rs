//! Pedestrian transfer edges from stop proximity.
//!
//! Stops are bucketed into a uniform geographic grid held as a flat
//! map from integer cell coordinates to stop indices, with cell size
//! equal to the walking radius. A candidate pair can then only span a
//! cell and its 8 neighbours, which bounds the pairwise distance
//! checks to near-linear. The longitude scale is corrected with the
//! mean latitude of the stop set; the correction degrades for
//! networks spanning extreme latitude ranges, which is acceptable for
//! a regional deployment.

use geo::{Distance, Haversine};
use hashbrown::HashMap;
use rayon::prelude::*;

use crate::Time;
use crate::build::GraphConfig;
use crate::model::{Edge, Stop};

/// Meters per degree of latitude, and of longitude at the equator.
const METERS_PER_DEGREE: f64 = 111_320.0;

struct SpatialGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
    meters_per_deg_lon: f64,
}

impl SpatialGrid {
    fn new(stops: &[Stop], cell_size: f64) -> Self {
        let mean_lat = stops.iter().map(|s| s.lat).sum::<f64>() / stops.len() as f64;
        let mut grid = SpatialGrid {
            cells: HashMap::new(),
            cell_size,
            meters_per_deg_lon: METERS_PER_DEGREE * mean_lat.to_radians().cos(),
        };
        for (idx, stop) in stops.iter().enumerate() {
            let cell = grid.cell_of(stop);
            grid.cells.entry(cell).or_default().push(idx);
        }
        grid
    }

    fn cell_of(&self, stop: &Stop) -> (i32, i32) {
        let row = (stop.lat * METERS_PER_DEGREE / self.cell_size).floor() as i32;
        let col = (stop.lon * self.meters_per_deg_lon / self.cell_size).floor() as i32;
        (row, col)
    }

    /// Stop indices in the cell of `stop` and its 8 neighbours.
    fn candidates(&self, stop: &Stop) -> impl Iterator<Item = usize> + '_ {
        let (row, col) = self.cell_of(stop);
        (-1..=1)
            .flat_map(move |dr| (-1..=1).map(move |dc| (row + dr, col + dc)))
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
    }
}

/// Connect every pair of distinct stops within the walking radius,
/// weighted by the walking time rounded up to whole seconds.
pub(crate) fn walking_edges(stops: &[Stop], config: &GraphConfig) -> Vec<Edge> {
    if stops.is_empty() {
        return Vec::new();
    }
    let grid = SpatialGrid::new(stops, config.walking_radius);

    // Every stop emits its own outgoing edges, so each qualifying
    // pair yields both directions without coordination.
    stops
        .par_iter()
        .enumerate()
        .flat_map_iter(|(idx, stop)| {
            grid.candidates(stop)
                .filter(move |&other| other != idx)
                .filter_map(move |other| {
                    let neighbor = &stops[other];
                    let meters = Haversine.distance(stop.location(), neighbor.location());
                    (meters <= config.walking_radius).then(|| {
                        let seconds = (meters / config.walking_speed).ceil() as Time;
                        Edge::walking(&stop.stop_id, &neighbor.stop_id, seconds)
                    })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_stops_get_mutual_edges() {
        // Roughly 100 m apart along a meridian.
        let stops = vec![
            Stop::new("a", "a", 50.8500, 4.3500),
            Stop::new("b", "b", 50.8509, 4.3500),
        ];
        let edges = walking_edges(&stops, &GraphConfig::default());
        assert_eq!(edges.len(), 2);
        let ab = edges.iter().find(|e| e.from == "a" && e.to == "b").unwrap();
        let ba = edges.iter().find(|e| e.from == "b" && e.to == "a").unwrap();
        assert_eq!(ab.travel_time, 72);
        assert_eq!(ba.travel_time, 72);
        assert!(ab.is_walking());
    }

    #[test]
    fn distant_stops_stay_unconnected() {
        // Roughly 10 km apart.
        let stops = vec![
            Stop::new("a", "a", 50.8500, 4.3500),
            Stop::new("b", "b", 50.9400, 4.3500),
        ];
        let edges = walking_edges(&stops, &GraphConfig::default());
        assert!(edges.is_empty());
    }

    #[test]
    fn neighbouring_cells_are_searched() {
        // 400 m apart: within radius but likely across a cell border.
        let stops = vec![
            Stop::new("a", "a", 50.8500, 4.3500),
            Stop::new("b", "b", 50.8536, 4.3500),
        ];
        let edges = walking_edges(&stops, &GraphConfig::default());
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn no_self_edges() {
        let stops = vec![Stop::new("a", "a", 50.85, 4.35)];
        let edges = walking_edges(&stops, &GraphConfig::default());
        assert!(edges.is_empty());
    }

    #[test]
    fn empty_stop_set_is_fine() {
        assert!(walking_edges(&[], &GraphConfig::default()).is_empty());
    }
}
