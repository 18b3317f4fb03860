//! Turns a verified route plan into the caller-facing [`Solution`].

use crate::error::{ConstraintKind, SolveError, SolveResult};
use crate::evaluation::RouteEvaluator;
use crate::indexing::VisitId;
use crate::models::{Route, SearchStatistics, Solution, Stop};
use crate::search::RoutePlan;

/// Reads schedules and loads off a plan.
///
/// Arrival times are the earliest feasible values of the time dimension,
/// loads come from the capacity dimension, and only vehicles that serve at
/// least one location are reported, in vehicle order.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::constructive::cheapest_insertion;
/// use fleet_dispatch::evaluation::RouteEvaluator;
/// use fleet_dispatch::extraction::SolutionExtractor;
/// use fleet_dispatch::models::{Location, ProblemInstance, SearchStatistics, StopReason, Vehicle};
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let model = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_demand(10), Location::new(2).with_demand(20)],
///     vec![Vehicle::new(0, 100), Vehicle::new(1, 100)],
///     rows.clone(),
///     rows,
/// )
/// .validate()
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// let plan = cheapest_insertion(&evaluator).unwrap();
/// let stats = SearchStatistics {
///     iterations: 0,
///     local_optima: 0,
///     construction_objective: 17,
///     elapsed_ms: 0,
///     stop_reason: StopReason::IterationLimit,
/// };
/// let solution = SolutionExtractor::new(&evaluator).extract(&plan, 17, stats).unwrap();
/// assert_eq!(solution.routes.len(), 1);
/// assert_eq!(solution.total_distance, 17);
/// assert_eq!(solution.total_load(), 30);
/// ```
pub struct SolutionExtractor<'e, 'a> {
    evaluator: &'e RouteEvaluator<'a>,
}

impl<'e, 'a> SolutionExtractor<'e, 'a> {
    pub fn new(evaluator: &'e RouteEvaluator<'a>) -> Self {
        Self { evaluator }
    }

    /// Builds the solution for `plan`, whose true objective is `objective`.
    ///
    /// Fails with [`SolveError::Internal`] if a route's schedule cannot be
    /// reconstructed.
    pub fn extract(
        &self,
        plan: &RoutePlan,
        objective: i64,
        statistics: SearchStatistics,
    ) -> SolveResult<Solution> {
        let mut routes = Vec::with_capacity(plan.num_used());
        for (vehicle, visits) in plan.routes().iter().enumerate() {
            if visits.len() > 2 {
                routes.push(self.extract_route(vehicle, visits)?);
            }
        }
        Ok(Solution::new(routes, objective, statistics))
    }

    fn extract_route(&self, vehicle: usize, visits: &[VisitId]) -> SolveResult<Route> {
        let model = self.evaluator.model();
        let dims = self.evaluator.dimensions();
        let locations: Vec<usize> = self.evaluator.locations(visits).collect();

        let unschedulable = |kind: ConstraintKind| {
            SolveError::Internal(format!(
                "route of vehicle {} cannot be scheduled within the {} constraint",
                model.vehicles()[vehicle].id(),
                kind
            ))
        };
        let times = dims
            .time()
            .cumuls(vehicle, locations.iter().copied())
            .map_err(unschedulable)?;
        let loads = dims
            .capacity()
            .cumuls(vehicle, locations.iter().copied())
            .map_err(unschedulable)?;
        if times.len() != locations.len() || loads.len() != locations.len() {
            return Err(SolveError::Internal(format!(
                "route of vehicle {} has no schedule",
                model.vehicles()[vehicle].id()
            )));
        }

        let mut route = Route::new(model.vehicles()[vehicle].id());
        for k in 1..locations.len() - 1 {
            let location = &model.locations()[locations[k]];
            route.push_stop(Stop {
                location_id: location.id(),
                name: location.name().map(str::to_owned),
                arrival_time: times[k],
                demand: location.demand(),
                load_after: loads[k] + location.demand(),
            });
        }
        route.total_distance = self.evaluator.cost().path_distance(locations.iter().copied());
        route.start_time = times[0];
        route.end_time = times[times.len() - 1];
        Ok(route)
    }
}
