//! Solution and search statistics types.

use serde::{Deserialize, Serialize};

use super::Route;

/// Overall outcome reported with a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Success,
}

/// Why the improvement phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The wall-clock budget elapsed.
    TimeLimit,
    /// The configured iteration cap was reached.
    IterationLimit,
    /// Too many consecutive local optima without a new best.
    Stalled,
    /// No arc could be penalized to escape the current local optimum.
    NoDiversification,
}

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Moves applied during improvement.
    pub iterations: usize,
    /// Local optima reached (and penalized) during improvement.
    pub local_optima: usize,
    /// Objective of the construction-phase solution.
    pub construction_objective: i64,
    /// Wall-clock time spent in the search, in milliseconds.
    pub elapsed_ms: u64,
    pub stop_reason: StopReason,
}

/// A complete dispatch plan.
///
/// Contains only dispatched vehicles; a vehicle with an empty route is not
/// listed.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::{Route, SearchStatistics, Solution, StopReason};
///
/// let stats = SearchStatistics {
///     iterations: 0,
///     local_optima: 0,
///     construction_objective: 0,
///     elapsed_ms: 0,
///     stop_reason: StopReason::Stalled,
/// };
/// let sol = Solution::new(vec![Route::new(0)], 0, stats);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.total_distance, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolveStatus,
    /// Sum of all route distances.
    pub total_distance: i64,
    /// Minimized objective: total distance plus fixed vehicle costs.
    pub objective: i64,
    pub routes: Vec<Route>,
    pub statistics: SearchStatistics,
}

impl Solution {
    /// Creates a successful solution; total distance is derived from routes.
    pub fn new(routes: Vec<Route>, objective: i64, statistics: SearchStatistics) -> Self {
        let total_distance = routes.iter().map(|r| r.total_distance).sum();
        Self {
            status: SolveStatus::Success,
            total_distance,
            objective,
            routes,
            statistics,
        }
    }

    /// Number of dispatched vehicles.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of stops served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Total load delivered across all routes.
    pub fn total_load(&self) -> i64 {
        self.routes.iter().map(|r| r.total_load).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn stats() -> SearchStatistics {
        SearchStatistics {
            iterations: 3,
            local_optima: 1,
            construction_objective: 140,
            elapsed_ms: 5,
            stop_reason: StopReason::Stalled,
        }
    }

    #[test]
    fn test_solution_with_routes() {
        let mut r1 = Route::new(0);
        r1.push_stop(Stop {
            location_id: 1,
            name: None,
            arrival_time: 0,
            demand: 10,
            load_after: 10,
        });
        r1.total_distance = 50;

        let mut r2 = Route::new(1);
        r2.push_stop(Stop {
            location_id: 2,
            name: Some("B".into()),
            arrival_time: 0,
            demand: 5,
            load_after: 5,
        });
        r2.total_distance = 80;

        let sol = Solution::new(vec![r1, r2], 130, stats());
        assert_eq!(sol.status, SolveStatus::Success);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 2);
        assert_eq!(sol.total_distance, 130);
        assert_eq!(sol.total_load(), 15);
    }

    #[test]
    fn test_status_serializes_as_success() {
        let sol = Solution::new(vec![], 0, stats());
        let json = serde_json::to_value(&sol).expect("json");
        assert_eq!(json["status"], "success");
        assert_eq!(json["statistics"]["stop_reason"], "stalled");
    }
}
