//! A single cumulative dimension.
//!
//! # Propagation
//!
//! Along a path `v₀ → v₁ → … → vₖ` the cumulative value is
//!
//! ```text
//! c₀     = 0                       if the dimension starts at zero
//!        = lo(v₀)                  otherwise
//! cᵢ₊₁   = max(cᵢ + transit(vᵢ, vᵢ₊₁), lo(vᵢ₊₁))
//! ```
//!
//! where the `max` is the slack (waiting) taken at `vᵢ₊₁`, limited by the
//! dimension's maximum slack. Every `cᵢ` must lie in
//! `[lo(vᵢ), min(hi(vᵢ), vehicle limit)]`. Taking the smallest admissible
//! value at every step yields the earliest feasible schedule, so a path is
//! feasible if and only if this propagation succeeds.

use super::transit::{DemandTransit, MatrixTransit, ServiceTimeTransit, TransitFn};
use crate::error::ConstraintKind;
use crate::models::ProblemModel;

/// A cumulative quantity tracked along every route.
pub struct Dimension<'a> {
    kind: ConstraintKind,
    transit: Box<dyn TransitFn + 'a>,
    slack_max: i64,
    node_ranges: Vec<(i64, i64)>,
    vehicle_limits: Vec<Option<i64>>,
    start_at_zero: bool,
}

impl<'a> Dimension<'a> {
    /// Creates a dimension from its parts.
    ///
    /// `node_ranges` is indexed by location; a vehicle whose limit is `None`
    /// is not constrained by this dimension.
    pub fn new(
        kind: ConstraintKind,
        transit: Box<dyn TransitFn + 'a>,
        slack_max: i64,
        node_ranges: Vec<(i64, i64)>,
        vehicle_limits: Vec<Option<i64>>,
        start_at_zero: bool,
    ) -> Self {
        Self {
            kind,
            transit,
            slack_max,
            node_ranges,
            vehicle_limits,
            start_at_zero,
        }
    }

    /// Load dimension: demand of each visited location, bounded by vehicle
    /// capacity, no slack, starting at zero.
    pub fn capacity(model: &'a ProblemModel) -> Self {
        let demands = model.locations().iter().map(|l| l.demand()).collect();
        Self::new(
            ConstraintKind::Capacity,
            Box::new(DemandTransit::new(demands)),
            0,
            vec![(0, i64::MAX); model.num_locations()],
            model.vehicles().iter().map(|v| Some(v.capacity())).collect(),
            true,
        )
    }

    /// Time dimension: travel time plus service at the origin, bounded per
    /// location by its window and globally by the horizon. Waiting up to the
    /// horizon is allowed; the start is free within the depot's window.
    pub fn time(model: &'a ProblemModel) -> Self {
        let horizon = model.horizon();
        let service = model.locations().iter().map(|l| l.service_time()).collect();
        let windows = model
            .locations()
            .iter()
            .map(|l| {
                let tw = l.time_window();
                (tw.start(), tw.end())
            })
            .collect();
        Self::new(
            ConstraintKind::TimeWindow,
            Box::new(ServiceTimeTransit::new(model.times(), service)),
            horizon,
            windows,
            vec![Some(horizon); model.num_vehicles()],
            false,
        )
    }

    /// Distance dimension, present only when some vehicle declares a
    /// positive maximum distance.
    pub fn distance(model: &'a ProblemModel) -> Option<Self> {
        let limits: Vec<Option<i64>> = model.vehicles().iter().map(|v| v.distance_limit()).collect();
        if limits.iter().all(Option::is_none) {
            return None;
        }
        Some(Self::new(
            ConstraintKind::Distance,
            Box::new(MatrixTransit::new(model.distances())),
            0,
            vec![(0, i64::MAX); model.num_locations()],
            limits,
            true,
        ))
    }

    /// Propagates earliest cumulative values along a path of locations,
    /// reporting each one to `on_cumul`.
    ///
    /// Returns `Err(kind)` at the first value that cannot be kept within
    /// bounds. Nothing is reported for a vehicle the dimension does not
    /// constrain.
    pub fn walk<I, F>(&self, vehicle: usize, path: I, mut on_cumul: F) -> Result<(), ConstraintKind>
    where
        I: IntoIterator<Item = usize>,
        F: FnMut(i64),
    {
        let Some(limit) = self.vehicle_limits[vehicle] else {
            return Ok(());
        };

        let mut prev: Option<(usize, i64)> = None;
        for location in path {
            let (lo, hi) = self.node_ranges[location];
            let hi = hi.min(limit);
            let cumul = match prev {
                None if self.start_at_zero => 0,
                None => lo,
                Some((from, value)) => {
                    let arrival = value.saturating_add(self.transit.transit(from, location));
                    let wait = (lo - arrival).max(0);
                    if wait > self.slack_max {
                        return Err(self.kind);
                    }
                    arrival + wait
                }
            };
            if cumul < lo || cumul > hi {
                return Err(self.kind);
            }
            on_cumul(cumul);
            prev = Some((location, cumul));
        }
        Ok(())
    }

    /// Earliest cumulative values along a path.
    ///
    /// Empty for a vehicle the dimension does not constrain.
    pub fn cumuls<I>(&self, vehicle: usize, path: I) -> Result<Vec<i64>, ConstraintKind>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut values = Vec::new();
        self.walk(vehicle, path, |c| values.push(c))?;
        Ok(values)
    }
}

impl std::fmt::Debug for Dimension<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dimension")
            .field("kind", &self.kind)
            .field("slack_max", &self.slack_max)
            .field("vehicle_limits", &self.vehicle_limits)
            .field("start_at_zero", &self.start_at_zero)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, ProblemInstance, Vehicle};

    fn model(locations: Vec<Location>, vehicles: Vec<Vehicle>) -> ProblemModel {
        let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
        ProblemInstance::new(locations, vehicles, rows.clone(), rows)
            .validate()
            .expect("valid")
    }

    #[test]
    fn test_capacity_cumuls() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_demand(10),
                Location::new(2).with_demand(15),
            ],
            vec![Vehicle::new(0, 30)],
        );
        let dim = Dimension::capacity(&m);
        // Load before serving each visit; the end carries the total.
        assert_eq!(dim.cumuls(0, [0, 1, 2, 0]).expect("fits"), vec![0, 0, 10, 25]);
    }

    #[test]
    fn test_capacity_exceeded() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_demand(60),
                Location::new(2).with_demand(60),
            ],
            vec![Vehicle::new(0, 100)],
        );
        let dim = Dimension::capacity(&m);
        assert!(dim.walk(0, [0, 1, 0], |_| {}).is_ok());
        assert_eq!(dim.walk(0, [0, 1, 2, 0], |_| {}), Err(ConstraintKind::Capacity));
    }

    #[test]
    fn test_time_waits_for_window() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_service_time(2).with_time_window(20, 40),
                Location::new(2),
            ],
            vec![Vehicle::new(0, 100)],
        );
        let dim = Dimension::time(&m);
        // Arrive at 5, wait to 20; leave after 2 units of service; 4 to reach 2.
        assert_eq!(dim.cumuls(0, [0, 1, 2, 0]).expect("fits"), vec![0, 20, 26, 34]);
    }

    #[test]
    fn test_time_start_follows_depot_window() {
        let m = model(
            vec![
                Location::new(0).with_time_window(100, 1_000),
                Location::new(1),
                Location::new(2),
            ],
            vec![Vehicle::new(0, 100)],
        );
        let dim = Dimension::time(&m);
        assert_eq!(dim.cumuls(0, [0, 1, 0]).expect("fits"), vec![100, 105, 110]);
    }

    #[test]
    fn test_time_window_missed() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_time_window(0, 3),
                Location::new(2),
            ],
            vec![Vehicle::new(0, 100)],
        );
        let dim = Dimension::time(&m);
        assert_eq!(dim.walk(0, [0, 1, 0], |_| {}), Err(ConstraintKind::TimeWindow));
    }

    #[test]
    fn test_distance_inactive_without_caps() {
        let m = model(
            vec![Location::new(0), Location::new(1), Location::new(2)],
            vec![Vehicle::new(0, 100)],
        );
        assert!(Dimension::distance(&m).is_none());
    }

    #[test]
    fn test_distance_cap_per_vehicle() {
        let m = model(
            vec![Location::new(0), Location::new(1), Location::new(2)],
            vec![Vehicle::new(0, 100).with_max_distance(12), Vehicle::new(1, 100)],
        );
        let dim = Dimension::distance(&m).expect("capped vehicle");
        assert_eq!(dim.cumuls(0, [0, 1, 0]).expect("fits"), vec![0, 5, 10]);
        // 5 + 4 + 8 = 17 > 12
        assert_eq!(dim.walk(0, [0, 1, 2, 0], |_| {}), Err(ConstraintKind::Distance));
        assert!(dim.walk(1, [0, 1, 2, 0], |_| {}).is_ok());
        assert!(dim.cumuls(1, [0, 1, 2, 0]).expect("inactive").is_empty());
    }
}
