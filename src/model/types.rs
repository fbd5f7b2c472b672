//! Value types supplied by the ingestion layer.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Time;

/// A transit stop with its GPS position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    /// Unique identifier across all merged feeds.
    pub stop_id: String,
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl Stop {
    pub fn new(
        stop_id: impl Into<String>,
        name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Stop {
            stop_id: stop_id.into(),
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Position as a `geo` point (x = longitude, y = latitude).
    pub fn location(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// One scheduled call of a trip at a stop.
///
/// Transient input to graph construction; not retained afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub trip_id: String,
    pub stop_id: String,
    /// Position of this call within the trip. Authoritative over any
    /// incoming record order.
    pub sequence: u32,
    /// Scheduled wall-clock departure at this stop.
    pub departure: NaiveTime,
}

impl TimetableEntry {
    /// Departure as seconds of day, in `[0, 86400)`.
    pub(crate) fn departure_secs(&self) -> Time {
        self.departure.num_seconds_from_midnight()
    }
}

/// A single vehicle run over an ordered stop sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,
    /// Identifier of the owning route.
    pub route_id: String,
}

/// A transit line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub route_id: String,
    pub short_name: String,
    pub mode: TransportMode,
}

/// Transport mode vocabulary used by routes and avoidance sets.
///
/// `Walk` is never carried by a route; it is the implicit mode of
/// pedestrian edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    Train,
    Tram,
    Bus,
    Metro,
    Walk,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportMode::Train => "TRAIN",
            TransportMode::Tram => "TRAM",
            TransportMode::Bus => "BUS",
            TransportMode::Metro => "METRO",
            TransportMode::Walk => "WALK",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_seconds_of_day() {
        let entry = TimetableEntry {
            trip_id: "t1".into(),
            stop_id: "s1".into(),
            sequence: 0,
            departure: NaiveTime::from_hms_opt(8, 5, 30).unwrap(),
        };
        assert_eq!(entry.departure_secs(), 8 * 3600 + 5 * 60 + 30);
    }

    #[test]
    fn mode_labels() {
        assert_eq!(TransportMode::Metro.to_string(), "METRO");
        assert_eq!(TransportMode::Walk.to_string(), "WALK");
    }
}
