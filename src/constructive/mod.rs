//! First-solution construction.
//!
//! - [`screen_infeasibility`] — cheap necessary-condition checks run first
//! - [`cheapest_insertion`] — parallel cheapest insertion over all vehicles

mod cheapest_insertion;
mod screening;

pub use cheapest_insertion::cheapest_insertion;
pub use screening::screen_infeasibility;

use crate::config::FirstSolutionStrategy;
use crate::error::SolveResult;
use crate::evaluation::RouteEvaluator;
use crate::search::RoutePlan;

/// Builds the first plan with the chosen strategy.
pub fn build_first_solution(
    strategy: FirstSolutionStrategy,
    evaluator: &RouteEvaluator<'_>,
) -> SolveResult<RoutePlan> {
    match strategy {
        FirstSolutionStrategy::CheapestInsertion => cheapest_insertion(evaluator),
    }
}
