//! Routable graph over the canonical stop set.

use geo::{Distance, Haversine};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::Time;
use crate::model::Stop;

/// Directed arc of the transit graph.
///
/// A scheduled arc (`trip_id` present) represents riding a vehicle
/// between two consecutive stops of one trip and carries the
/// timetabled departure at its origin. A pedestrian arc carries
/// neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Identifier of the source stop.
    pub from: String,
    /// Identifier of the destination stop.
    pub to: String,
    /// Travel time in seconds.
    pub travel_time: Time,
    pub trip_id: Option<String>,
    /// Scheduled origin departure in seconds of day, present iff
    /// `trip_id` is.
    pub departure: Option<Time>,
}

impl Edge {
    pub fn scheduled(
        from: &str,
        to: &str,
        travel_time: Time,
        trip_id: &str,
        departure: Time,
    ) -> Self {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            travel_time,
            trip_id: Some(trip_id.to_string()),
            departure: Some(departure),
        }
    }

    pub fn walking(from: &str, to: &str, travel_time: Time) -> Self {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            travel_time,
            trip_id: None,
            departure: None,
        }
    }

    pub fn is_walking(&self) -> bool {
        self.trip_id.is_none()
    }
}

/// Immutable adjacency store over the canonical stop set.
///
/// Built once by [`crate::build::build_graph`]; searches only ever
/// take it by shared reference.
#[derive(Debug, Default)]
pub struct TransitGraph {
    pub(crate) graph: DiGraph<Stop, Edge>,
    stop_index: HashMap<String, NodeIndex>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop. Idempotent: the first registration of an
    /// identifier wins.
    pub fn add_stop(&mut self, stop: &Stop) -> NodeIndex {
        if let Some(&idx) = self.stop_index.get(&stop.stop_id) {
            return idx;
        }
        let idx = self.graph.add_node(stop.clone());
        self.stop_index.insert(stop.stop_id.clone(), idx);
        idx
    }

    /// Add a directed edge, registering its endpoints if absent.
    pub fn add_edge(&mut self, from: &Stop, to: &Stop, edge: Edge) {
        let a = self.add_stop(from);
        let b = self.add_stop(to);
        self.graph.add_edge(a, b, edge);
    }

    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All registered stops, in registration order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.graph.node_weights()
    }

    /// Look up a stop by identifier.
    pub fn stop(&self, stop_id: &str) -> Option<&Stop> {
        self.node(stop_id).map(|idx| &self.graph[idx])
    }

    /// Outgoing edges of a stop; empty for unknown identifiers.
    pub fn outgoing(&self, stop_id: &str) -> impl Iterator<Item = &Edge> {
        self.node(stop_id)
            .into_iter()
            .flat_map(|idx| self.graph.edges(idx).map(|edge| edge.weight()))
    }

    /// Great-circle distance between two stops in meters.
    pub fn distance(&self, a: &Stop, b: &Stop) -> f64 {
        Haversine.distance(a.location(), b.location())
    }

    pub(crate) fn node(&self, stop_id: &str) -> Option<NodeIndex> {
        self.stop_index.get(stop_id).copied()
    }

    pub(crate) fn stop_at(&self, node: NodeIndex) -> &Stop {
        &self.graph[node]
    }

    pub(crate) fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.graph[idx]
    }
}
