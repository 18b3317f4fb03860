//! The `solve` entry point.
//!
//! A solve call validates the instance, screens out provably infeasible
//! ones, builds a first plan by cheapest insertion, improves it with guided
//! local search until a stop condition holds, re-verifies the best plan, and
//! extracts the caller-facing [`Solution`]. All working state is owned by
//! the call, so independent calls may run concurrently.

use log::{info, warn};

use crate::config::SolverConfig;
use crate::constructive::screen_infeasibility;
use crate::error::{SolveError, SolveResult};
use crate::evaluation::RouteEvaluator;
use crate::extraction::SolutionExtractor;
use crate::models::{ProblemInstance, ProblemModel, Solution};
use crate::search::{RoutePlan, SearchEngine, SearchOutcome};

/// Solves an instance with the default [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let instance = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_demand(10), Location::new(2).with_demand(10)],
///     vec![Vehicle::new(0, 100)],
///     rows.clone(),
///     rows,
/// )
/// .with_time_limit_seconds(1);
///
/// let solution = fleet_dispatch::solve(&instance).unwrap();
/// assert_eq!(solution.total_distance, 17);
/// assert_eq!(solution.routes.len(), 1);
/// ```
pub fn solve(instance: &ProblemInstance) -> SolveResult<Solution> {
    solve_with_config(instance, &SolverConfig::default())
}

/// Solves an instance with an explicit configuration.
///
/// # Errors
///
/// - [`SolveError::Validation`] if the instance is malformed; no search runs
/// - [`SolveError::Infeasible`] if no plan can serve every location
/// - [`SolveError::Internal`] if the best plan fails re-verification
pub fn solve_with_config(instance: &ProblemInstance, config: &SolverConfig) -> SolveResult<Solution> {
    let model = instance.validate().map_err(|err| {
        warn!("rejected instance: {}", err);
        SolveError::from(err)
    })?;
    info!(
        "solving {} locations with {} vehicles (depot {}, fixed vehicle cost {})",
        model.num_locations(),
        model.num_vehicles(),
        model.depot(),
        model.fixed_vehicle_cost()
    );

    screen_infeasibility(&model)?;

    let evaluator = RouteEvaluator::new(&model);
    let outcome = SearchEngine::new(&evaluator, config).run()?;
    verify_outcome(&evaluator, &outcome)?;

    let solution = SolutionExtractor::new(&evaluator).extract(
        &outcome.plan,
        outcome.objective,
        outcome.statistics,
    )?;
    let expected = matrix_distance(&model, &evaluator, &outcome.plan);
    if solution.total_distance != expected {
        let err = SolveError::Internal(format!(
            "reported distance {} differs from matrix sum {}",
            solution.total_distance, expected
        ));
        warn!("{}", err);
        return Err(err);
    }

    info!(
        "solved: objective {}, distance {}, {} vehicles used, {} ms ({:?})",
        solution.objective,
        solution.total_distance,
        solution.num_routes(),
        solution.statistics.elapsed_ms,
        solution.statistics.stop_reason
    );
    Ok(solution)
}

/// Re-checks the best plan from scratch before anything is reported.
fn verify_outcome(evaluator: &RouteEvaluator<'_>, outcome: &SearchOutcome) -> SolveResult<()> {
    let violations = evaluator.verify(&outcome.plan);
    if let Some(first) = violations.first() {
        let err = SolveError::Internal(format!(
            "{} violation(s), first: {}",
            violations.len(),
            first
        ));
        warn!("{}", err);
        return Err(err);
    }
    let objective = evaluator.objective(&outcome.plan);
    if objective != outcome.objective {
        let err = SolveError::Internal(format!(
            "tracked objective {} differs from recomputed {}",
            outcome.objective, objective
        ));
        warn!("{}", err);
        return Err(err);
    }
    Ok(())
}

/// Sum of distance-matrix entries along every used route.
fn matrix_distance(model: &ProblemModel, evaluator: &RouteEvaluator<'_>, plan: &RoutePlan) -> i64 {
    plan.routes()
        .iter()
        .filter(|r| r.len() > 2)
        .flat_map(|r| r.windows(2))
        .map(|pair| {
            let index = evaluator.index();
            model.distance(index.location_of(pair[0]), index.location_of(pair[1]))
        })
        .sum()
}
