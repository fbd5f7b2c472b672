//! Pluggable edge-cost policies.

use hashbrown::{HashMap, HashSet};

use crate::Time;
use crate::model::{Edge, Route, TransportMode, Trip};

/// Outcome of pricing one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeCost {
    /// The edge may be taken at this cost in seconds.
    Allowed(Time),
    /// The edge is excluded from consideration entirely.
    Forbidden,
}

/// Edge-cost policy injected into the searches.
///
/// `previous` is the edge used to reach the current state, if any, so
/// a policy can price transitions such as trip changes.
pub trait CostFunction: Send + Sync {
    fn cost(&self, edge: &Edge, previous: Option<&Edge>) -> EdgeCost;
}

impl<F> CostFunction for F
where
    F: Fn(&Edge, Option<&Edge>) -> EdgeCost + Send + Sync,
{
    fn cost(&self, edge: &Edge, previous: Option<&Edge>) -> EdgeCost {
        self(edge, previous)
    }
}

/// Plain travel time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TravelTime;

impl CostFunction for TravelTime {
    fn cost(&self, edge: &Edge, _previous: Option<&Edge>) -> EdgeCost {
        EdgeCost::Allowed(edge.travel_time)
    }
}

/// Travel time plus a fixed penalty whenever the trip changes,
/// including transitions to and from walking.
#[derive(Debug, Clone, Copy)]
pub struct TransferPenalty {
    pub penalty: Time,
}

impl Default for TransferPenalty {
    fn default() -> Self {
        TransferPenalty { penalty: 300 }
    }
}

impl CostFunction for TransferPenalty {
    fn cost(&self, edge: &Edge, previous: Option<&Edge>) -> EdgeCost {
        let mut cost = edge.travel_time;
        if let Some(prev) = previous {
            if prev.trip_id != edge.trip_id {
                cost += self.penalty;
            }
        }
        EdgeCost::Allowed(cost)
    }
}

/// Travel time scaled up on pedestrian edges, identity otherwise.
#[derive(Debug, Clone, Copy)]
pub struct WalkPenalty {
    pub factor: u32,
}

impl Default for WalkPenalty {
    fn default() -> Self {
        WalkPenalty { factor: 10 }
    }
}

impl CostFunction for WalkPenalty {
    fn cost(&self, edge: &Edge, _previous: Option<&Edge>) -> EdgeCost {
        if edge.is_walking() {
            EdgeCost::Allowed(edge.travel_time * self.factor)
        } else {
            EdgeCost::Allowed(edge.travel_time)
        }
    }
}

/// Forbids edges whose transport mode is in the avoided set.
///
/// Pedestrian edges are implicitly [`TransportMode::Walk`]; scheduled
/// edges resolve trip → route → mode through the supplied lookup
/// tables. An edge whose trip or route is missing from the tables
/// stays allowed at plain travel time.
pub struct AvoidModes {
    avoided: HashSet<TransportMode>,
    trips: HashMap<String, Trip>,
    routes: HashMap<String, Route>,
}

impl AvoidModes {
    pub fn new(
        avoided: HashSet<TransportMode>,
        trips: HashMap<String, Trip>,
        routes: HashMap<String, Route>,
    ) -> Self {
        AvoidModes {
            avoided,
            trips,
            routes,
        }
    }

    fn mode_of(&self, edge: &Edge) -> Option<TransportMode> {
        match &edge.trip_id {
            None => Some(TransportMode::Walk),
            Some(trip_id) => {
                let trip = self.trips.get(trip_id)?;
                self.routes.get(&trip.route_id).map(|route| route.mode)
            }
        }
    }
}

impl CostFunction for AvoidModes {
    fn cost(&self, edge: &Edge, _previous: Option<&Edge>) -> EdgeCost {
        match self.mode_of(edge) {
            Some(mode) if self.avoided.contains(&mode) => EdgeCost::Forbidden,
            _ => EdgeCost::Allowed(edge.travel_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(trip: &str, travel_time: Time) -> Edge {
        Edge::scheduled("a", "b", travel_time, trip, 28_800)
    }

    fn tables() -> (HashMap<String, Trip>, HashMap<String, Route>) {
        let trips = [
            (
                "t1".to_string(),
                Trip {
                    trip_id: "t1".into(),
                    route_id: "r1".into(),
                },
            ),
            (
                "t2".to_string(),
                Trip {
                    trip_id: "t2".into(),
                    route_id: "r2".into(),
                },
            ),
        ]
        .into_iter()
        .collect();
        let routes = [
            (
                "r1".to_string(),
                Route {
                    route_id: "r1".into(),
                    short_name: "1".into(),
                    mode: TransportMode::Bus,
                },
            ),
            (
                "r2".to_string(),
                Route {
                    route_id: "r2".into(),
                    short_name: "2".into(),
                    mode: TransportMode::Tram,
                },
            ),
        ]
        .into_iter()
        .collect();
        (trips, routes)
    }

    #[test]
    fn travel_time_is_identity() {
        let edge = scheduled("t1", 120);
        assert_eq!(TravelTime.cost(&edge, None), EdgeCost::Allowed(120));
    }

    #[test]
    fn transfer_penalty_on_trip_change_only() {
        let policy = TransferPenalty::default();
        let first = scheduled("t1", 120);
        let same = scheduled("t1", 60);
        let other = scheduled("t2", 60);
        let walk = Edge::walking("b", "c", 60);

        assert_eq!(policy.cost(&first, None), EdgeCost::Allowed(120));
        assert_eq!(policy.cost(&same, Some(&first)), EdgeCost::Allowed(60));
        assert_eq!(policy.cost(&other, Some(&first)), EdgeCost::Allowed(360));
        assert_eq!(policy.cost(&walk, Some(&first)), EdgeCost::Allowed(360));
        assert_eq!(policy.cost(&first, Some(&walk)), EdgeCost::Allowed(420));
    }

    #[test]
    fn walk_penalty_scales_pedestrian_edges_only() {
        let policy = WalkPenalty::default();
        let walk = Edge::walking("a", "b", 60);
        let ride = scheduled("t1", 60);
        assert_eq!(policy.cost(&walk, None), EdgeCost::Allowed(600));
        assert_eq!(policy.cost(&ride, None), EdgeCost::Allowed(60));
    }

    #[test]
    fn avoided_mode_is_forbidden() {
        let (trips, routes) = tables();
        let policy = AvoidModes::new([TransportMode::Bus].into_iter().collect(), trips, routes);
        assert_eq!(policy.cost(&scheduled("t1", 120), None), EdgeCost::Forbidden);
        assert_eq!(
            policy.cost(&scheduled("t2", 120), None),
            EdgeCost::Allowed(120)
        );
    }

    #[test]
    fn walking_counts_as_a_mode() {
        let (trips, routes) = tables();
        let policy = AvoidModes::new([TransportMode::Walk].into_iter().collect(), trips, routes);
        assert_eq!(
            policy.cost(&Edge::walking("a", "b", 60), None),
            EdgeCost::Forbidden
        );
    }

    #[test]
    fn unresolvable_trip_stays_allowed() {
        let (trips, routes) = tables();
        let policy = AvoidModes::new([TransportMode::Bus].into_iter().collect(), trips, routes);
        assert_eq!(
            policy.cost(&scheduled("unknown", 90), None),
            EdgeCost::Allowed(90)
        );
    }

    #[test]
    fn closures_are_policies_too() {
        let free_rides = |edge: &Edge, _prev: Option<&Edge>| {
            if edge.is_walking() {
                EdgeCost::Allowed(edge.travel_time)
            } else {
                EdgeCost::Allowed(0)
            }
        };
        let policy: &dyn CostFunction = &free_rides;
        assert_eq!(policy.cost(&scheduled("t1", 300), None), EdgeCost::Allowed(0));
    }
}
