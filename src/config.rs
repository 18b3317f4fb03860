//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the first solution is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Repeatedly insert the location whose cheapest feasible insertion adds
    /// the least cost.
    #[default]
    CheapestInsertion,
}

/// Local search neighborhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Move one visit to another position, in the same or another route.
    Relocate,
    /// Swap two visits, in the same or different routes.
    Exchange,
    /// Reverse a segment of one route.
    TwoOpt,
    /// Move a chain of two or three consecutive visits.
    OrOpt,
    /// Swap the tails of two routes (2-opt*).
    CrossExchange,
}

impl Operator {
    /// Every neighborhood, in default scan order.
    pub const ALL: [Operator; 5] = [
        Operator::Relocate,
        Operator::Exchange,
        Operator::TwoOpt,
        Operator::OrOpt,
        Operator::CrossExchange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Relocate => "relocate",
            Self::Exchange => "exchange",
            Self::TwoOpt => "two_opt",
            Self::OrOpt => "or_opt",
            Self::CrossExchange => "cross_exchange",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for one solve call.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_dispatch::config::{Operator, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_operators(vec![Operator::Relocate, Operator::TwoOpt])
///     .with_time_limit(Duration::from_millis(200))
///     .with_seed(7);
/// assert_eq!(config.operators.len(), 2);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// First-solution heuristic.
    pub first_solution: FirstSolutionStrategy,

    /// Enabled neighborhoods, scanned in this order.
    pub operators: Vec<Operator>,

    /// Guided local search penalty scale, as a fraction of the average arc
    /// cost of the first solution.
    pub penalty_factor: f64,

    /// Stop after this many consecutive local optima without a new best.
    pub max_stalled_optima: usize,

    /// Hard cap on accepted moves.
    pub max_iterations: Option<usize>,

    /// Wall-clock budget; overrides the instance's `time_limit_seconds`.
    pub time_limit: Option<Duration>,

    /// Shuffles route scan order at every local optimum when set.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            first_solution: FirstSolutionStrategy::CheapestInsertion,
            operators: Operator::ALL.to_vec(),
            penalty_factor: 0.1,
            max_stalled_optima: 1_000,
            max_iterations: None,
            time_limit: None,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    pub fn with_operators(mut self, operators: Vec<Operator>) -> Self {
        self.operators = operators;
        self
    }

    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    pub fn with_max_stalled_optima(mut self, n: usize) -> Self {
        self.max_stalled_optima = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
