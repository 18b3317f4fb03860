//! Dispatched route and stop types.

use serde::{Deserialize, Serialize};

/// A single stop at a non-depot location within a dispatched route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Identifier of the visited location.
    pub location_id: u64,
    /// Display name of the visited location, if any.
    pub name: Option<String>,
    /// Time at which service starts (after any waiting).
    pub arrival_time: i64,
    /// Quantity delivered at this stop.
    pub demand: i64,
    /// Cumulative load delivered after this stop.
    pub load_after: i64,
}

/// An ordered sequence of stops served by a single vehicle.
///
/// The route starts and ends at the depot; depot visits are not stored in
/// `stops` but their times are kept in `start_time` and `end_time`.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::{Route, Stop};
///
/// let mut route = Route::new(7);
/// route.push_stop(Stop {
///     location_id: 1,
///     name: None,
///     arrival_time: 10,
///     demand: 10,
///     load_after: 10,
/// });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.vehicle_id, 7);
/// assert_eq!(route.total_load, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub vehicle_id: u64,
    pub stops: Vec<Stop>,
    /// Sum of arc distances from depot departure to depot return.
    pub total_distance: i64,
    /// Sum of demands over all stops.
    pub total_load: i64,
    /// Departure time from the depot.
    pub start_time: i64,
    /// Return time to the depot.
    pub end_time: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: u64) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            total_distance: 0,
            total_load: 0,
            start_time: 0,
            end_time: 0,
        }
    }

    /// Appends a stop and accounts for its demand.
    pub fn push_stop(&mut self, stop: Stop) {
        self.total_load += stop.demand;
        self.stops.push(stop);
    }

    /// Number of stops (excluding depot).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Location IDs in visit order.
    pub fn location_ids(&self) -> Vec<u64> {
        self.stops.iter().map(|s| s.location_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: u64, demand: i64, load_after: i64) -> Stop {
        Stop {
            location_id: id,
            name: None,
            arrival_time: 0,
            demand,
            load_after,
        }
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.total_distance, 0);
        assert_eq!(r.total_load, 0);
    }

    #[test]
    fn test_route_push_stop() {
        let mut r = Route::new(1);
        r.push_stop(stop(5, 20, 20));
        r.push_stop(stop(3, 15, 35));
        assert_eq!(r.len(), 2);
        assert_eq!(r.location_ids(), vec![5, 3]);
        assert_eq!(r.total_load, 35);
    }
}
