// Re-export key components
pub use crate::build::{GraphConfig, build_graph};
pub use crate::error::Error;
pub use crate::model::{Edge, Route, Stop, TimetableEntry, TransitGraph, TransportMode, Trip};
pub use crate::routing::astar::{SearchLimits, astar};
pub use crate::routing::cost::{
    AvoidModes, CostFunction, EdgeCost, TransferPenalty, TravelTime, WalkPenalty,
};
pub use crate::routing::dijkstra::{ShortestPaths, shortest_paths};

// Core scalar types
pub use crate::{SECONDS_PER_DAY, Time};
