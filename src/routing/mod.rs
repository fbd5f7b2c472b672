//! Search algorithms over the transit graph.

pub mod astar;
pub mod cost;
pub mod dijkstra;

// Re-export main interfaces
pub use astar::{SearchLimits, astar};
pub use cost::{AvoidModes, CostFunction, EdgeCost, TransferPenalty, TravelTime, WalkPenalty};
pub use dijkstra::{ShortestPaths, shortest_paths};
