use serde::{Deserialize, Serialize};

/// Parameters for pedestrian-transfer generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Maximum walking transfer distance in meters.
    pub walking_radius: f64,
    /// Assumed walking speed in meters per second.
    pub walking_speed: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            walking_radius: 500.0,
            walking_speed: 1.4,
        }
    }
}
