//! Quick infeasibility screening before any search work.
//!
//! Every check here is a necessary condition for a feasible plan, so a
//! failure is a proof of infeasibility; passing proves nothing.

use log::warn;

use crate::error::{ConstraintKind, SolveError, SolveResult};
use crate::models::ProblemModel;

/// Rejects instances that no plan can serve.
///
/// Checks, in order: total demand against fleet capacity, each demand
/// against the largest vehicle, each window against the earliest possible
/// arrival and the depot's closing time, and each depot round trip against
/// the largest distance cap when every vehicle is capped.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::constructive::screen_infeasibility;
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let rows = vec![vec![0, 50], vec![50, 0]];
/// let model = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_time_window(0, 10)],
///     vec![Vehicle::new(0, 10)],
///     rows.clone(),
///     rows,
/// )
/// .validate()
/// .unwrap();
///
/// assert!(screen_infeasibility(&model).unwrap_err().is_infeasible());
/// ```
pub fn screen_infeasibility(model: &ProblemModel) -> SolveResult<()> {
    let result = screen_capacity(model)
        .and_then(|()| screen_time_windows(model))
        .and_then(|()| screen_distance_caps(model));
    if let Err(err) = &result {
        warn!("instance rejected before search: {}", err);
    }
    result
}

fn screen_capacity(model: &ProblemModel) -> SolveResult<()> {
    let demand = model.total_demand();
    let capacity = model.total_capacity();
    if demand > capacity {
        return Err(SolveError::infeasible(
            ConstraintKind::Capacity,
            format!("total demand {demand} exceeds total fleet capacity {capacity}"),
        ));
    }

    let largest = model.vehicles().iter().map(|v| v.capacity()).max().unwrap_or(0);
    for (i, location) in model.locations().iter().enumerate() {
        if i != model.depot() && location.demand() > largest {
            return Err(SolveError::infeasible(
                ConstraintKind::Capacity,
                format!(
                    "location {} demands {} but the largest vehicle holds {}",
                    location.id(),
                    location.demand(),
                    largest
                ),
            ));
        }
    }
    Ok(())
}

fn screen_time_windows(model: &ProblemModel) -> SolveResult<()> {
    let depot = model.depot();
    let depot_window = model.time_window(depot);
    let departure = depot_window.start() + model.service_time(depot);

    for (i, location) in model.locations().iter().enumerate() {
        if i == depot {
            continue;
        }
        let window = model.time_window(i);
        let arrival = departure + model.travel_time(depot, i);
        if arrival > window.end() {
            return Err(SolveError::infeasible(
                ConstraintKind::TimeWindow,
                format!(
                    "location {} closes at {} but the earliest arrival from the depot is {}",
                    location.id(),
                    window.end(),
                    arrival
                ),
            ));
        }
        let back = arrival.max(window.start()) + model.service_time(i) + model.travel_time(i, depot);
        if back > depot_window.end() {
            return Err(SolveError::infeasible(
                ConstraintKind::TimeWindow,
                format!(
                    "after serving location {} the earliest return is {}, after the depot closes at {}",
                    location.id(),
                    back,
                    depot_window.end()
                ),
            ));
        }
    }
    Ok(())
}

fn screen_distance_caps(model: &ProblemModel) -> SolveResult<()> {
    let caps: Option<Vec<i64>> = model.vehicles().iter().map(|v| v.distance_limit()).collect();
    let Some(largest) = caps.and_then(|c| c.into_iter().max()) else {
        return Ok(());
    };

    let depot = model.depot();
    for (i, location) in model.locations().iter().enumerate() {
        if i == depot {
            continue;
        }
        let round_trip = model.distance(depot, i) + model.distance(i, depot);
        if round_trip > largest {
            return Err(SolveError::infeasible(
                ConstraintKind::Distance,
                format!(
                    "location {} needs a round trip of {} but the largest distance cap is {}",
                    location.id(),
                    round_trip,
                    largest
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintClass;
    use crate::models::{Location, ProblemInstance, Vehicle};

    fn rows() -> Vec<Vec<i64>> {
        vec![vec![0, 10, 20], vec![10, 0, 15], vec![20, 15, 0]]
    }

    fn model(locations: Vec<Location>, vehicles: Vec<Vehicle>) -> ProblemModel {
        ProblemInstance::new(locations, vehicles, rows(), rows())
            .validate()
            .expect("valid")
    }

    fn class(m: &ProblemModel) -> Option<ConstraintClass> {
        screen_infeasibility(m).err().map(|e| e.constraint_class())
    }

    #[test]
    fn test_feasible_instance_passes() {
        let m = model(
            vec![Location::new(0), Location::new(1).with_demand(5), Location::new(2).with_demand(5)],
            vec![Vehicle::new(0, 10)],
        );
        assert!(screen_infeasibility(&m).is_ok());
    }

    #[test]
    fn test_total_demand_over_capacity() {
        let m = model(
            vec![Location::new(0), Location::new(1).with_demand(60), Location::new(2).with_demand(60)],
            vec![Vehicle::new(0, 100)],
        );
        assert_eq!(class(&m), Some(ConstraintClass::Capacity));
    }

    #[test]
    fn test_single_demand_over_largest_vehicle() {
        let m = model(
            vec![Location::new(0), Location::new(1).with_demand(30), Location::new(2).with_demand(1)],
            vec![Vehicle::new(0, 20), Vehicle::new(1, 20)],
        );
        let err = screen_infeasibility(&m).expect_err("too large");
        assert!(err.to_string().contains("location 1 demands 30"));
    }

    #[test]
    fn test_unreachable_window() {
        let m = model(
            vec![Location::new(0), Location::new(1), Location::new(2).with_time_window(0, 19)],
            vec![Vehicle::new(0, 10)],
        );
        assert_eq!(class(&m), Some(ConstraintClass::TimeWindow));
    }

    #[test]
    fn test_depot_closes_too_early() {
        let m = model(
            vec![
                Location::new(0).with_time_window(0, 30),
                Location::new(1).with_service_time(25),
                Location::new(2),
            ],
            vec![Vehicle::new(0, 10)],
        );
        // 10 travel + 25 service + 10 back = 45 > 30
        assert_eq!(class(&m), Some(ConstraintClass::TimeWindow));
    }

    #[test]
    fn test_distance_cap_only_when_all_capped() {
        let capped = model(
            vec![Location::new(0), Location::new(1), Location::new(2)],
            vec![Vehicle::new(0, 10).with_max_distance(30)],
        );
        assert_eq!(class(&capped), Some(ConstraintClass::Distance));

        let mixed = model(
            vec![Location::new(0), Location::new(1), Location::new(2)],
            vec![Vehicle::new(0, 10).with_max_distance(30), Vehicle::new(1, 10)],
        );
        assert!(screen_infeasibility(&mixed).is_ok());
    }
}
