//! Parallel cheapest insertion.
//!
//! # Algorithm
//!
//! All vehicles start empty. Each round prices every unrouted location at
//! every position of every vehicle's route:
//!
//! ```text
//! Δ = c(prev, u) + c(u, next) - c(prev, next)      (used route)
//! Δ = c(start, u) + c(u, end) + fixed cost          (unused route)
//! ```
//!
//! and commits the cheapest insertion that keeps every dimension feasible.
//! Feasibility is only checked for candidates that beat the current best.
//! Scans run in location, vehicle, then position order with strict
//! comparison, so ties go to the earliest candidate.
//!
//! When no feasible insertion remains for some location, the first such
//! location is diagnosed by the constraint that rejected most of its
//! candidate positions.
//!
//! # Complexity
//!
//! O(n² × (n + V)) insertions priced overall, each feasibility check
//! O(route length).

use log::{debug, warn};

use crate::error::{ConstraintKind, SolveError, SolveResult};
use crate::evaluation::RouteEvaluator;
use crate::indexing::VisitId;
use crate::search::RoutePlan;

#[derive(Debug, Clone, Copy)]
struct Insertion {
    unrouted: usize,
    vehicle: usize,
    position: usize,
    delta: i64,
}

/// Builds a first plan serving every location, or reports why one location
/// cannot be served.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::constructive::cheapest_insertion;
/// use fleet_dispatch::evaluation::RouteEvaluator;
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let model = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_demand(10), Location::new(2).with_demand(20)],
///     vec![Vehicle::new(0, 100)],
///     rows.clone(),
///     rows,
/// )
/// .validate()
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// let plan = cheapest_insertion(&evaluator).unwrap();
/// assert_eq!(plan.num_served(), 2);
/// assert_eq!(evaluator.objective(&plan), 17);
/// ```
pub fn cheapest_insertion(evaluator: &RouteEvaluator<'_>) -> SolveResult<RoutePlan> {
    let index = evaluator.index();
    let mut plan = RoutePlan::empty(index);
    let mut unrouted: Vec<VisitId> = index.ordinary_visits().collect();
    let mut buf = Vec::new();

    while !unrouted.is_empty() {
        let mut best: Option<Insertion> = None;

        for (u, &visit) in unrouted.iter().enumerate() {
            let location = index.location_of(visit);
            for vehicle in 0..plan.num_vehicles() {
                let route = plan.route(vehicle);
                for position in 1..route.len() {
                    let delta = insertion_delta(evaluator, route, position, location);
                    if best.as_ref().is_some_and(|b| delta >= b.delta) {
                        continue;
                    }
                    with_inserted(&mut buf, route, position, visit);
                    if evaluator.check(vehicle, &buf).is_ok() {
                        best = Some(Insertion {
                            unrouted: u,
                            vehicle,
                            position,
                            delta,
                        });
                    }
                }
            }
        }

        let Some(ins) = best else {
            break;
        };
        let visit = unrouted.remove(ins.unrouted);
        plan.insert(ins.vehicle, ins.position, visit);
    }

    if let Some(&visit) = unrouted.first() {
        let err = diagnose(evaluator, &plan, visit);
        warn!("construction stopped with {} locations unrouted: {}", unrouted.len(), err);
        return Err(err);
    }

    debug!(
        "cheapest insertion served {} locations on {} vehicles, objective {}",
        plan.num_served(),
        plan.num_used(),
        evaluator.objective(&plan)
    );
    Ok(plan)
}

/// Cost added by inserting `location` before `route[position]`.
fn insertion_delta(evaluator: &RouteEvaluator<'_>, route: &[VisitId], position: usize, location: usize) -> i64 {
    let cost = evaluator.cost();
    let index = evaluator.index();
    let prev = index.location_of(route[position - 1]);
    let next = index.location_of(route[position]);
    let added = cost.arc_cost(prev, location) + cost.arc_cost(location, next);
    if route.len() == 2 {
        added + cost.fixed_vehicle_cost()
    } else {
        added - cost.arc_cost(prev, next)
    }
}

fn with_inserted(buf: &mut Vec<VisitId>, route: &[VisitId], position: usize, visit: VisitId) {
    buf.clear();
    buf.extend_from_slice(&route[..position]);
    buf.push(visit);
    buf.extend_from_slice(&route[position..]);
}

/// Re-tries every position for `visit` and blames the constraint kind that
/// rejected the most of them. Ties go to capacity, then time window.
fn diagnose(evaluator: &RouteEvaluator<'_>, plan: &RoutePlan, visit: VisitId) -> SolveError {
    let mut tally = [
        (ConstraintKind::Capacity, 0usize),
        (ConstraintKind::TimeWindow, 0),
        (ConstraintKind::Distance, 0),
    ];
    let mut candidates = 0usize;
    let mut buf = Vec::new();

    for vehicle in 0..plan.num_vehicles() {
        let route = plan.route(vehicle);
        for position in 1..route.len() {
            candidates += 1;
            with_inserted(&mut buf, route, position, visit);
            if let Err(kind) = evaluator.check(vehicle, &buf) {
                if let Some(slot) = tally.iter_mut().find(|(k, _)| *k == kind) {
                    slot.1 += 1;
                }
            }
        }
    }

    let (kind, rejected) = tally
        .iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .copied()
        .unwrap_or((ConstraintKind::Capacity, 0));

    let location = &evaluator.model().locations()[evaluator.index().location_of(visit)];
    SolveError::infeasible(
        kind,
        format!(
            "location {} cannot be added to any route: {} of {} candidate positions violate the {} constraint",
            location.id(),
            rejected,
            candidates,
            kind
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintClass;
    use crate::models::{Location, ProblemInstance, ProblemModel, Vehicle};

    fn rows() -> Vec<Vec<i64>> {
        vec![
            vec![0, 10, 10, 20],
            vec![10, 0, 5, 10],
            vec![10, 5, 0, 10],
            vec![20, 10, 10, 0],
        ]
    }

    fn model(locations: Vec<Location>, vehicles: Vec<Vehicle>) -> ProblemModel {
        ProblemInstance::new(locations, vehicles, rows(), rows())
            .validate()
            .expect("valid")
    }

    #[test]
    fn test_serves_everyone() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_demand(5),
                Location::new(2).with_demand(5),
                Location::new(3).with_demand(5),
            ],
            vec![Vehicle::new(0, 100), Vehicle::new(1, 100)],
        );
        let eval = RouteEvaluator::new(&m);
        let plan = cheapest_insertion(&eval).expect("feasible");
        assert_eq!(plan.num_served(), 3);
        assert!(eval.verify(&plan).is_empty());
    }

    #[test]
    fn test_fixed_cost_favors_one_vehicle() {
        let locations = vec![
            Location::new(0),
            Location::new(1).with_demand(1),
            Location::new(2).with_demand(1),
            Location::new(3).with_demand(1),
        ];
        let m = ProblemInstance::new(
            locations,
            vec![Vehicle::new(0, 100), Vehicle::new(1, 100)],
            rows(),
            rows(),
        )
        .with_fixed_vehicle_cost(1_000)
        .validate()
        .expect("valid");
        let eval = RouteEvaluator::new(&m);
        let plan = cheapest_insertion(&eval).expect("feasible");
        assert_eq!(plan.num_used(), 1);
    }

    #[test]
    fn test_ties_go_to_first_vehicle() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_demand(1),
                Location::new(2).with_demand(1),
                Location::new(3).with_demand(1),
            ],
            vec![Vehicle::new(0, 100), Vehicle::new(1, 100)],
        );
        let eval = RouteEvaluator::new(&m);
        let plan = cheapest_insertion(&eval).expect("feasible");
        assert!(plan.is_used(0));
    }

    #[test]
    fn test_capacity_splits_routes() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_demand(6),
                Location::new(2).with_demand(6),
                Location::new(3).with_demand(6),
            ],
            vec![Vehicle::new(0, 10), Vehicle::new(1, 10), Vehicle::new(2, 10)],
        );
        let eval = RouteEvaluator::new(&m);
        let plan = cheapest_insertion(&eval).expect("feasible");
        assert_eq!(plan.num_used(), 3);
    }

    #[test]
    fn test_conflicting_windows_reported() {
        // Both 1 and 2 must be served at exactly t = 10, one vehicle.
        let m = model(
            vec![
                Location::new(0).with_time_window(0, 100),
                Location::new(1).with_time_window(10, 10),
                Location::new(2).with_time_window(10, 10),
                Location::new(3),
            ],
            vec![Vehicle::new(0, 100)],
        );
        let eval = RouteEvaluator::new(&m);
        let err = cheapest_insertion(&eval).expect_err("one vehicle cannot be in two places");
        assert_eq!(err.constraint_class(), ConstraintClass::TimeWindow);
    }

    #[test]
    fn test_fleet_capacity_reported() {
        let m = model(
            vec![
                Location::new(0),
                Location::new(1).with_demand(6),
                Location::new(2).with_demand(6),
                Location::new(3).with_demand(6),
            ],
            vec![Vehicle::new(0, 10), Vehicle::new(1, 10)],
        );
        let eval = RouteEvaluator::new(&m);
        let err = cheapest_insertion(&eval).expect_err("two vehicles hold two locations");
        assert_eq!(err.constraint_class(), ConstraintClass::Capacity);
        assert!(err.to_string().contains("location 3"));
    }
}
