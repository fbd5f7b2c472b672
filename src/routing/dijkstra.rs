//! Static-weight single-source search.
//!
//! Baseline and verification tool: edge weights are taken as fixed
//! travel times with no schedule-waiting logic and no query time.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::Time;
use crate::error::Error;
use crate::model::{Edge, TransitGraph};

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: Time,
    node: NodeIndex,
}

// Min-heap by cost (reversed from standard Rust BinaryHeap)
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest static-weight paths from a single source.
///
/// Holds the per-stop best cumulative cost and predecessor edge of
/// one completed run; query methods resolve stops by identifier.
pub struct ShortestPaths<'a> {
    graph: &'a TransitGraph,
    dist: HashMap<NodeIndex, Time>,
    prev: HashMap<NodeIndex, EdgeIndex>,
}

/// Runs Dijkstra's algorithm from `source` over static edge weights,
/// yielding distances to every reachable stop.
///
/// # Errors
///
/// Returns [`Error::UnknownStop`] if `source` is not in the graph.
pub fn shortest_paths<'a>(
    graph: &'a TransitGraph,
    source: &str,
) -> Result<ShortestPaths<'a>, Error> {
    let start = graph
        .node(source)
        .ok_or_else(|| Error::UnknownStop(source.to_string()))?;

    let mut dist: HashMap<NodeIndex, Time> = HashMap::new();
    let mut prev: HashMap<NodeIndex, EdgeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(start, 0);
    heap.push(State {
        cost: 0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if dist.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().travel_time;

            match dist.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    prev.insert(next, edge.id());
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        prev.insert(next, edge.id());
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    Ok(ShortestPaths { graph, dist, prev })
}

impl ShortestPaths<'_> {
    /// Cumulative cost in seconds to reach `stop_id`, if reachable.
    pub fn distance_to(&self, stop_id: &str) -> Option<Time> {
        let node = self.graph.node(stop_id)?;
        self.dist.get(&node).copied()
    }

    pub fn has_path_to(&self, stop_id: &str) -> bool {
        self.distance_to(stop_id).is_some()
    }

    /// Edges of the shortest path to `stop_id`, in source → stop
    /// order; empty when the stop is the source itself.
    pub fn path_to(&self, stop_id: &str) -> Option<Vec<Edge>> {
        let target = self.graph.node(stop_id)?;
        self.dist.get(&target)?;

        let mut path = Vec::new();
        let mut node = target;
        while let Some(&edge_idx) = self.prev.get(&node) {
            path.push(self.graph.edge(edge_idx).clone());
            let (from, _) = self.graph.graph.edge_endpoints(edge_idx)?;
            node = from;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stop;

    fn stop(id: &str) -> Stop {
        Stop::new(id, id, 50.85, 4.35)
    }

    /// a → b → d is cheaper than the direct a → d edge; c is off to
    /// the side and e is unreachable.
    fn diamond() -> TransitGraph {
        let mut graph = TransitGraph::new();
        let (a, b, c, d, e) = (stop("a"), stop("b"), stop("c"), stop("d"), stop("e"));
        graph.add_edge(&a, &b, Edge::walking("a", "b", 100));
        graph.add_edge(&b, &d, Edge::walking("b", "d", 100));
        graph.add_edge(&a, &d, Edge::walking("a", "d", 300));
        graph.add_edge(&a, &c, Edge::walking("a", "c", 50));
        graph.add_edge(&c, &d, Edge::walking("c", "d", 400));
        graph.add_stop(&e);
        graph
    }

    #[test]
    fn distances_match_brute_force_minimum() {
        let graph = diamond();
        let tree = shortest_paths(&graph, "a").unwrap();
        assert_eq!(tree.distance_to("a"), Some(0));
        assert_eq!(tree.distance_to("b"), Some(100));
        assert_eq!(tree.distance_to("c"), Some(50));
        assert_eq!(tree.distance_to("d"), Some(200));
    }

    #[test]
    fn unreachable_stop_reports_absent() {
        let graph = diamond();
        let tree = shortest_paths(&graph, "a").unwrap();
        assert_eq!(tree.distance_to("e"), None);
        assert!(!tree.has_path_to("e"));
        assert_eq!(tree.path_to("e"), None);
    }

    #[test]
    fn path_weights_sum_to_reported_distance() {
        let graph = diamond();
        let tree = shortest_paths(&graph, "a").unwrap();
        let path = tree.path_to("d").unwrap();
        let total: Time = path.iter().map(|e| e.travel_time).sum();
        assert_eq!(total, tree.distance_to("d").unwrap());
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].from, "a");
        assert_eq!(path[0].to, "b");
        assert_eq!(path[1].to, "d");
    }

    #[test]
    fn path_to_source_is_empty() {
        let graph = diamond();
        let tree = shortest_paths(&graph, "a").unwrap();
        assert_eq!(tree.path_to("a"), Some(vec![]));
    }

    #[test]
    fn unknown_source_is_an_error() {
        let graph = diamond();
        assert!(matches!(
            shortest_paths(&graph, "nope"),
            Err(Error::UnknownStop(_))
        ));
    }
}
