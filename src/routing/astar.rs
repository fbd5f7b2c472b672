//! Time-dependent, goal-directed itinerary search.
//!
//! Unlike the static baseline, edges with a timetabled departure are
//! only taken at that departure; a departure already in the past is
//! assumed to run again the next day (one repeating daily schedule,
//! no calendar semantics).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{NaiveTime, Timelike};
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::Error;
use crate::model::{Edge, TransitGraph};
use crate::routing::cost::{CostFunction, EdgeCost};
use crate::{SECONDS_PER_DAY, Time};

/// Assumed maximum vehicle speed in m/s, the divisor of the
/// remaining-time heuristic. The bound is admissible for plain
/// travel-time costs; transfer penalties, walk multipliers and mode
/// avoidance can inflate true costs past it, losing the optimal
/// node-expansion guarantee but not completeness.
const MAX_VEHICLE_SPEED: f64 = 30.0;

/// Caps on search effort.
///
/// Forbidden-edge policies can force exploration far beyond what a
/// plain weighted search would visit; a budget turns a runaway query
/// into [`Error::LimitExceeded`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Maximum number of frontier expansions, unbounded when `None`.
    pub max_expansions: Option<usize>,
}

/// Reached search state; lives in an arena so predecessor links are
/// plain indices.
struct SearchState {
    node: NodeIndex,
    /// Absolute arrival in seconds since the query-day midnight.
    arrival: Time,
    /// Accumulated policy cost.
    cost: Time,
    parent: Option<usize>,
    via: Option<EdgeIndex>,
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct QueueEntry {
    priority: Time,
    cost: Time,
    state: usize,
}

// Min-heap by heuristic-inclusive priority, ties broken by
// accumulated cost for reproducibility.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes one minimum-cost itinerary from `source` to `target`,
/// departing at `departure`, under the injected cost policy.
///
/// Returns the ordered edge sequence, or `None` when no path exists.
/// The graph is never mutated; all search state is private to the
/// call.
///
/// # Errors
///
/// [`Error::UnknownStop`] if `source` or `target` is not in the
/// graph; [`Error::LimitExceeded`] if the expansion budget runs out.
pub fn astar(
    graph: &TransitGraph,
    source: &str,
    target: &str,
    departure: NaiveTime,
    policy: &dyn CostFunction,
    limits: SearchLimits,
) -> Result<Option<Vec<Edge>>, Error> {
    let source_node = graph
        .node(source)
        .ok_or_else(|| Error::UnknownStop(source.to_string()))?;
    let target_node = graph
        .node(target)
        .ok_or_else(|| Error::UnknownStop(target.to_string()))?;

    let target_stop = graph.stop_at(target_node);
    let heuristic = |node: NodeIndex| -> Time {
        let meters = graph.distance(graph.stop_at(node), target_stop);
        (meters / MAX_VEHICLE_SPEED) as Time
    };

    let departure_secs = departure.num_seconds_from_midnight();

    let mut arena: Vec<SearchState> = vec![SearchState {
        node: source_node,
        arrival: departure_secs,
        cost: 0,
        parent: None,
        via: None,
    }];
    let mut best_arrival: HashMap<NodeIndex, Time> = HashMap::new();
    best_arrival.insert(source_node, departure_secs);

    let mut frontier = BinaryHeap::new();
    frontier.push(QueueEntry {
        priority: heuristic(source_node),
        cost: 0,
        state: 0,
    });

    let mut expansions = 0usize;

    while let Some(QueueEntry { state, .. }) = frontier.pop() {
        let (node, arrival, cost_so_far, via) = {
            let current = &arena[state];
            (current.node, current.arrival, current.cost, current.via)
        };

        if node == target_node {
            return Ok(Some(reconstruct(graph, &arena, state)));
        }

        // Ignore stale states
        if best_arrival.get(&node).is_some_and(|&best| arrival > best) {
            continue;
        }

        if let Some(max) = limits.max_expansions {
            if expansions >= max {
                return Err(Error::LimitExceeded(max));
            }
        }
        expansions += 1;

        let prev_edge = via.map(|idx| graph.edge(idx));

        for edge_ref in graph.graph.edges(node) {
            let edge = edge_ref.weight();

            // Scheduled edges leave at their timetabled departure; one
            // already in the past runs again the next day.
            let basis = match edge.departure {
                Some(scheduled) if scheduled < arrival => scheduled + SECONDS_PER_DAY,
                Some(scheduled) => scheduled,
                None => arrival,
            };

            let step = match policy.cost(edge, prev_edge) {
                EdgeCost::Forbidden => continue,
                EdgeCost::Allowed(cost) => cost,
            };

            let next = edge_ref.target();
            let new_arrival = basis + step;

            if best_arrival
                .get(&next)
                .is_none_or(|&best| new_arrival < best)
            {
                best_arrival.insert(next, new_arrival);
                let new_cost = cost_so_far + step;
                arena.push(SearchState {
                    node: next,
                    arrival: new_arrival,
                    cost: new_cost,
                    parent: Some(state),
                    via: Some(edge_ref.id()),
                });
                frontier.push(QueueEntry {
                    priority: new_cost + heuristic(next),
                    cost: new_cost,
                    state: arena.len() - 1,
                });
            }
        }
    }

    Ok(None)
}

fn reconstruct(graph: &TransitGraph, arena: &[SearchState], end: usize) -> Vec<Edge> {
    let mut path = Vec::new();
    let mut state = end;
    while let (Some(edge), Some(parent)) = (arena[state].via, arena[state].parent) {
        path.push(graph.edge(edge).clone());
        state = parent;
    }
    path.reverse();
    path
}
