//! Problem instance (request body) and its validated form.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Location, TimeWindow, Vehicle};
use crate::distance::IntMatrix;
use crate::error::{MatrixKind, ValidationError};

/// Default search budget in seconds.
pub const DEFAULT_TIME_LIMIT_SECONDS: u64 = 30;

/// Largest accepted matrix entry, demand, service time, window bound,
/// capacity, distance cap, or fixed cost (about 1.1e12).
///
/// Route sums over any instance that fits in memory stay far below
/// `i64::MAX` under this bound.
pub const MAX_INPUT_VALUE: i64 = 1 << 40;

fn default_time_limit() -> u64 {
    DEFAULT_TIME_LIMIT_SECONDS
}

/// A routing instance as supplied by the caller.
///
/// This is the unvalidated input. Call [`ProblemInstance::validate`] (or
/// [`solve`](crate::solve), which does so first) to obtain a
/// [`ProblemModel`].
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let instance = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_demand(10)],
///     vec![Vehicle::new(0, 100)],
///     vec![vec![0, 5], vec![5, 0]],
///     vec![vec![0, 5], vec![5, 0]],
/// )
/// .with_time_limit_seconds(1);
///
/// let model = instance.validate().unwrap();
/// assert_eq!(model.num_locations(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemInstance {
    #[serde(default)]
    pub depot_index: usize,
    pub locations: Vec<Location>,
    pub vehicles: Vec<Vehicle>,
    pub distance_matrix: Vec<Vec<i64>>,
    pub time_matrix: Vec<Vec<i64>>,
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: u64,
    #[serde(default)]
    pub fixed_vehicle_cost: i64,
}

impl ProblemInstance {
    /// Creates an instance with depot 0, the default time budget, and no
    /// fixed vehicle cost.
    pub fn new(
        locations: Vec<Location>,
        vehicles: Vec<Vehicle>,
        distance_matrix: Vec<Vec<i64>>,
        time_matrix: Vec<Vec<i64>>,
    ) -> Self {
        Self {
            depot_index: 0,
            locations,
            vehicles,
            distance_matrix,
            time_matrix,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
            fixed_vehicle_cost: 0,
        }
    }

    /// Sets the depot location index.
    pub fn with_depot(mut self, depot_index: usize) -> Self {
        self.depot_index = depot_index;
        self
    }

    /// Sets the search time budget.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    /// Sets the fixed activation cost charged per dispatched vehicle.
    pub fn with_fixed_vehicle_cost(mut self, cost: i64) -> Self {
        self.fixed_vehicle_cost = cost;
        self
    }

    /// Checks structural consistency and builds the immutable model.
    ///
    /// The first defect found is reported; no search work happens here.
    /// The depot must carry no demand, and every scalar quantity must lie
    /// in `[0, MAX_INPUT_VALUE]`.
    pub fn validate(&self) -> Result<ProblemModel, ValidationError> {
        let n = self.locations.len();
        if n < 2 {
            return Err(ValidationError::TooFewLocations { count: n });
        }
        if self.vehicles.is_empty() {
            return Err(ValidationError::NoVehicles);
        }
        if self.depot_index >= n {
            return Err(ValidationError::DepotOutOfRange {
                depot_index: self.depot_index,
                num_locations: n,
            });
        }

        let distances = IntMatrix::validated(&self.distance_matrix, n, MatrixKind::Distance)?;
        let times = IntMatrix::validated(&self.time_matrix, n, MatrixKind::Time)?;

        for (location, loc) in self.locations.iter().enumerate() {
            if loc.demand() < 0 {
                return Err(ValidationError::NegativeDemand {
                    location,
                    demand: loc.demand(),
                });
            }
            if location == self.depot_index && loc.demand() != 0 {
                return Err(ValidationError::DepotDemand {
                    location,
                    demand: loc.demand(),
                });
            }
            if loc.service_time() < 0 {
                return Err(ValidationError::NegativeServiceTime {
                    location,
                    service_time: loc.service_time(),
                });
            }
            let (start, end) = loc.window_bounds();
            if start < 0 || start > end {
                return Err(ValidationError::InvalidTimeWindow {
                    location,
                    start,
                    end,
                });
            }
            bounded(|| format!("location {location} demand"), loc.demand())?;
            bounded(|| format!("location {location} service_time"), loc.service_time())?;
            bounded(|| format!("location {location} time_window_end"), end)?;
        }

        for (vehicle, v) in self.vehicles.iter().enumerate() {
            if v.capacity() < 0 {
                return Err(ValidationError::NegativeCapacity {
                    vehicle,
                    capacity: v.capacity(),
                });
            }
            if v.max_distance() < 0 {
                return Err(ValidationError::NegativeMaxDistance {
                    vehicle,
                    max_distance: v.max_distance(),
                });
            }
            bounded(|| format!("vehicle {vehicle} capacity"), v.capacity())?;
            bounded(|| format!("vehicle {vehicle} max_distance"), v.max_distance())?;
        }

        if self.time_limit_seconds == 0 {
            return Err(ValidationError::ZeroTimeLimit);
        }
        if self.fixed_vehicle_cost < 0 {
            return Err(ValidationError::NegativeFixedCost {
                cost: self.fixed_vehicle_cost,
            });
        }
        bounded(|| "fixed_vehicle_cost".to_string(), self.fixed_vehicle_cost)?;

        Ok(ProblemModel {
            locations: self.locations.clone(),
            vehicles: self.vehicles.clone(),
            depot: self.depot_index,
            distances,
            times,
            time_limit: Duration::from_secs(self.time_limit_seconds),
            fixed_vehicle_cost: self.fixed_vehicle_cost,
        })
    }
}

fn bounded(field: impl FnOnce() -> String, value: i64) -> Result<(), ValidationError> {
    if value > MAX_INPUT_VALUE {
        return Err(ValidationError::ValueTooLarge {
            field: field(),
            value,
        });
    }
    Ok(())
}

/// Validated, immutable routing instance.
///
/// Every accessor may assume the invariants checked by
/// [`ProblemInstance::validate`]: square matrices of side N, a valid depot
/// index, non-negative quantities, and well-ordered time windows.
#[derive(Debug, Clone)]
pub struct ProblemModel {
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    depot: usize,
    distances: IntMatrix,
    times: IntMatrix,
    time_limit: Duration,
    fixed_vehicle_cost: i64,
}

impl ProblemModel {
    /// All locations, including the depot.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The fleet.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of locations, including the depot.
    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Index of the depot location.
    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn distances(&self) -> &IntMatrix {
        &self.distances
    }

    pub fn times(&self) -> &IntMatrix {
        &self.times
    }

    /// Travel distance between two locations.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to)
    }

    /// Travel time between two locations (excluding service).
    #[inline]
    pub fn travel_time(&self, from: usize, to: usize) -> i64 {
        self.times.get(from, to)
    }

    #[inline]
    pub fn demand(&self, location: usize) -> i64 {
        self.locations[location].demand()
    }

    #[inline]
    pub fn service_time(&self, location: usize) -> i64 {
        self.locations[location].service_time()
    }

    #[inline]
    pub fn time_window(&self, location: usize) -> TimeWindow {
        self.locations[location].time_window()
    }

    /// Latest window end over all locations; bounds the time dimension.
    pub fn horizon(&self) -> i64 {
        self.locations
            .iter()
            .map(|l| l.time_window().end())
            .max()
            .unwrap_or(0)
    }

    /// Total demand over all non-depot locations.
    pub fn total_demand(&self) -> i64 {
        self.locations
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != self.depot)
            .fold(0i64, |acc, (_, l)| acc.saturating_add(l.demand()))
    }

    /// Total capacity of the fleet.
    pub fn total_capacity(&self) -> i64 {
        self.vehicles
            .iter()
            .fold(0i64, |acc, v| acc.saturating_add(v.capacity()))
    }

    /// Search time budget.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Fixed cost charged once per dispatched vehicle.
    pub fn fixed_vehicle_cost(&self) -> i64 {
        self.fixed_vehicle_cost
    }
}
