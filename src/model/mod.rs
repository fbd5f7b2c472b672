//! Data model for the multimodal transit network.
//!
//! Contains the value types crossing the ingestion boundary and the
//! routable graph built from them.

pub mod graph;
pub mod types;

pub use graph::{Edge, TransitGraph};
pub use types::{Route, Stop, TimetableEntry, TransportMode, Trip};
