//! Construction followed by guided local search under a wall-clock budget.

use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SolverConfig;
use crate::constructive::build_first_solution;
use crate::error::SolveResult;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{self, MoveScanner};
use crate::models::{SearchStatistics, StopReason};

use super::{ArcPenalties, RouteCost, RoutePlan};

/// Best plan found by a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub plan: RoutePlan,
    /// True objective of `plan`.
    pub objective: i64,
    pub statistics: SearchStatistics,
}

/// Drives one search run.
///
/// Each iteration scans the enabled neighborhoods for the best improving
/// move under the augmented objective and applies it. When none exists the
/// plan is a local optimum: its highest-utility arcs are penalized and the
/// scan resumes. The best plan by true objective is kept throughout.
///
/// The run stops at the first of: the time limit, the iteration cap, too
/// many consecutive local optima without a new best, or a local optimum
/// with nothing left to penalize.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_dispatch::config::SolverConfig;
/// use fleet_dispatch::evaluation::RouteEvaluator;
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
/// use fleet_dispatch::search::SearchEngine;
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
/// let config = SolverConfig::default()
///     .with_max_stalled_optima(10)
///     .with_time_limit(Duration::from_secs(2));
/// let outcome = SearchEngine::new(&evaluator, &config).run().unwrap();
/// assert_eq!(outcome.objective, 17);
/// ```
pub struct SearchEngine<'e, 'a> {
    evaluator: &'e RouteEvaluator<'a>,
    config: &'e SolverConfig,
    time_limit: Duration,
}

impl<'e, 'a> SearchEngine<'e, 'a> {
    /// The time limit comes from the config when set, else from the
    /// instance.
    pub fn new(evaluator: &'e RouteEvaluator<'a>, config: &'e SolverConfig) -> Self {
        let time_limit = config
            .time_limit
            .unwrap_or_else(|| evaluator.model().time_limit());
        Self {
            evaluator,
            config,
            time_limit,
        }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Builds a first plan, then improves it until a stop condition holds.
    pub fn run(&self) -> SolveResult<SearchOutcome> {
        let started = Instant::now();
        let initial = build_first_solution(self.config.first_solution, self.evaluator)?;
        Ok(self.improve(initial, started))
    }

    /// Improves `initial` with guided local search. `started` anchors the
    /// time limit.
    pub fn improve(&self, initial: RoutePlan, started: Instant) -> SearchOutcome {
        let evaluator = self.evaluator;
        let deadline = started.checked_add(self.time_limit);
        let expired = || deadline.is_some_and(|d| Instant::now() >= d);

        let construction_objective = evaluator.objective(&initial);
        let (arc_cost, num_arcs) = arc_totals(evaluator, &initial);
        let lambda = ArcPenalties::lambda_for(arc_cost, num_arcs, self.config.penalty_factor);
        let mut penalties = ArcPenalties::new(evaluator.model().num_locations(), lambda);
        debug!(
            "construction objective {}, {} arcs, penalty scale {}",
            construction_objective, num_arcs, lambda
        );

        let mut plan = initial;
        let mut costs = route_costs(evaluator, &penalties, &plan);
        let mut current = construction_objective;
        let mut best = plan.clone();
        let mut best_objective = current;

        let mut order: Vec<usize> = (0..plan.num_vehicles()).collect();
        let mut rng = self.config.seed.map(StdRng::seed_from_u64);

        let mut iterations = 0usize;
        let mut local_optima = 0usize;
        let mut stalled = 0usize;

        let stop_reason = loop {
            if expired() {
                break StopReason::TimeLimit;
            }
            if self.config.max_iterations.is_some_and(|max| iterations >= max) {
                break StopReason::IterationLimit;
            }

            let mut scanner =
                MoveScanner::new(evaluator, &penalties, &plan, &costs).with_deadline(deadline);
            for &operator in &self.config.operators {
                local_search::scan(operator, &mut scanner, &order);
                if scanner.is_expired() || expired() {
                    break;
                }
            }

            match scanner.into_best() {
                Some(candidate) => {
                    iterations += 1;
                    current += candidate.actual_delta;
                    trace!(
                        "{} move: actual {:+}, augmented {:+}, objective {}",
                        candidate.operator,
                        candidate.actual_delta,
                        candidate.augmented_delta,
                        current
                    );
                    for (vehicle, route) in candidate.changes {
                        costs[vehicle] = penalties.route_cost(evaluator, &route);
                        plan.replace(vehicle, route);
                    }
                    if current < best_objective {
                        best_objective = current;
                        best.clone_from(&plan);
                        stalled = 0;
                        debug!("new best objective {} after {} moves", best_objective, iterations);
                    }
                }
                None => {
                    if expired() {
                        break StopReason::TimeLimit;
                    }
                    local_optima += 1;
                    stalled += 1;
                    if stalled > self.config.max_stalled_optima {
                        break StopReason::Stalled;
                    }
                    let penalized = penalties.penalize(evaluator, &plan);
                    if penalized == 0 {
                        break StopReason::NoDiversification;
                    }
                    debug!(
                        "local optimum {} at objective {}: penalized {} arcs",
                        local_optima, current, penalized
                    );
                    costs = route_costs(evaluator, &penalties, &plan);
                    if let Some(rng) = rng.as_mut() {
                        order.shuffle(rng);
                    }
                }
            }
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            "search stopped ({:?}) after {} moves and {} local optima; best objective {}",
            stop_reason, iterations, local_optima, best_objective
        );

        SearchOutcome {
            plan: best,
            objective: best_objective,
            statistics: SearchStatistics {
                iterations,
                local_optima,
                construction_objective,
                elapsed_ms,
                stop_reason,
            },
        }
    }
}

/// Total arc cost and arc count over the used routes of a plan.
fn arc_totals(evaluator: &RouteEvaluator<'_>, plan: &RoutePlan) -> (i64, usize) {
    plan.routes()
        .iter()
        .filter(|r| r.len() > 2)
        .fold((0, 0), |(cost, arcs), r| {
            (cost + evaluator.route_distance(r), arcs + r.len() - 1)
        })
}

fn route_costs(evaluator: &RouteEvaluator<'_>, penalties: &ArcPenalties, plan: &RoutePlan) -> Vec<RouteCost> {
    plan.routes()
        .iter()
        .map(|r| penalties.route_cost(evaluator, r))
        .collect()
}
