//! Vehicle type with capacity and distance limit.

use serde::{Deserialize, Serialize};

/// A vehicle that can be dispatched from the depot.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::Vehicle;
///
/// let v = Vehicle::new(0, 200);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.distance_limit(), None);
///
/// let capped = Vehicle::new(1, 100).with_max_distance(5_000);
/// assert_eq!(capped.distance_limit(), Some(5_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: u64,
    capacity: i64,
    #[serde(default)]
    max_distance: i64,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity and no distance cap.
    pub fn new(id: u64, capacity: i64) -> Self {
        Self {
            id,
            capacity,
            max_distance: 0,
        }
    }

    /// Sets the maximum route distance (0 = unconstrained).
    pub fn with_max_distance(mut self, max: i64) -> Self {
        self.max_distance = max;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Raw maximum distance as supplied (0 = unconstrained).
    pub fn max_distance(&self) -> i64 {
        self.max_distance
    }

    /// Maximum distance limit, if one is declared.
    pub fn distance_limit(&self) -> Option<i64> {
        (self.max_distance > 0).then_some(self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(0, 200);
        assert_eq!(v.id(), 0);
        assert_eq!(v.capacity(), 200);
        assert_eq!(v.max_distance(), 0);
        assert!(v.distance_limit().is_none());
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new(1, 100).with_max_distance(500);
        assert_eq!(v.id(), 1);
        assert_eq!(v.capacity(), 100);
        assert_eq!(v.distance_limit(), Some(500));
    }

    #[test]
    fn test_vehicle_deserialize() {
        let v: Vehicle = serde_json::from_str(r#"{"id": 9, "capacity": 40}"#).expect("json");
        assert_eq!(v, Vehicle::new(9, 40));
    }
}
