//! Guided local search penalties.
//!
//! # Algorithm
//!
//! Every arc `(i, j)` between locations is a feature with cost `c(i, j)`.
//! When the search reaches a local optimum, the arcs of the current plan with
//! the highest utility
//!
//! ```text
//! util(i, j) = c(i, j) / (1 + p(i, j))
//! ```
//!
//! get their penalty count `p(i, j)` incremented. Moves are then ranked by the
//! augmented cost `c(i, j) + λ · p(i, j)` summed over the arcs they produce,
//! which pushes the search away from the features it keeps returning to.
//!
//! λ is fixed at setup: `penalty_factor × (construction arc cost / arcs)`,
//! rounded and at least one.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its application
//! to the traveling salesman problem". *European Journal of Operational
//! Research*, 113(2), 469-499.

use crate::evaluation::RouteEvaluator;
use crate::indexing::VisitId;

use super::RoutePlan;

/// True and penalized cost of one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteCost {
    /// Arc costs plus the fixed vehicle cost when used.
    pub actual: i64,
    /// `actual` plus λ times the penalty count of every arc.
    pub augmented: i64,
}

/// Dense per-arc penalty counts with a fixed scale λ.
#[derive(Debug, Clone)]
pub struct ArcPenalties {
    counts: Vec<u32>,
    size: usize,
    lambda: i64,
}

impl ArcPenalties {
    /// Zero penalties over `num_locations²` arcs.
    pub fn new(num_locations: usize, lambda: i64) -> Self {
        Self {
            counts: vec![0; num_locations * num_locations],
            size: num_locations,
            lambda,
        }
    }

    /// λ for a starting plan whose routes contain `num_arcs` arcs costing
    /// `arc_cost` in total.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_dispatch::search::ArcPenalties;
    ///
    /// assert_eq!(ArcPenalties::lambda_for(1_000, 10, 0.1), 10);
    /// assert_eq!(ArcPenalties::lambda_for(0, 0, 0.1), 1);
    /// ```
    pub fn lambda_for(arc_cost: i64, num_arcs: usize, penalty_factor: f64) -> i64 {
        if num_arcs == 0 {
            return 1;
        }
        let scaled = penalty_factor * arc_cost as f64 / num_arcs as f64;
        if scaled.is_finite() {
            (scaled.round() as i64).max(1)
        } else {
            1
        }
    }

    /// Penalty count of an arc.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.size + to]
    }

    fn increment(&mut self, from: usize, to: usize) {
        let slot = &mut self.counts[from * self.size + to];
        *slot = slot.saturating_add(1);
    }

    /// True and augmented cost of a visit sequence. An unused vehicle costs
    /// nothing.
    pub fn route_cost(&self, evaluator: &RouteEvaluator<'_>, route: &[VisitId]) -> RouteCost {
        if route.len() <= 2 {
            return RouteCost::default();
        }
        let cost = evaluator.cost();
        let mut actual = cost.fixed_vehicle_cost();
        let mut penalty = 0i64;
        for pair in route.windows(2) {
            let from = evaluator.index().location_of(pair[0]);
            let to = evaluator.index().location_of(pair[1]);
            actual += cost.arc_cost(from, to);
            penalty += i64::from(self.get(from, to));
        }
        RouteCost {
            actual,
            augmented: actual.saturating_add(self.lambda.saturating_mul(penalty)),
        }
    }

    /// Penalizes the maximum-utility arcs of the used routes in `plan`.
    ///
    /// Returns the number of distinct arcs penalized. Zero means every arc in
    /// the plan has zero cost, so penalties cannot move the search anywhere.
    pub fn penalize(&mut self, evaluator: &RouteEvaluator<'_>, plan: &RoutePlan) -> usize {
        let cost = evaluator.cost();
        let mut best: Vec<(usize, usize)> = Vec::new();
        // Utility c / (1 + p), kept as a fraction to compare exactly.
        let mut best_utility: (i64, i64) = (0, 1);

        for route in plan.routes().iter().filter(|r| r.len() > 2) {
            for pair in route.windows(2) {
                let from = evaluator.index().location_of(pair[0]);
                let to = evaluator.index().location_of(pair[1]);
                let c = cost.arc_cost(from, to);
                if c <= 0 {
                    continue;
                }
                let utility = (c, 1 + i64::from(self.get(from, to)));
                let lhs = i128::from(utility.0) * i128::from(best_utility.1);
                let rhs = i128::from(best_utility.0) * i128::from(utility.1);
                if lhs > rhs {
                    best_utility = utility;
                    best.clear();
                    best.push((from, to));
                } else if lhs == rhs && best_utility.0 > 0 {
                    best.push((from, to));
                }
            }
        }

        best.sort_unstable();
        best.dedup();
        for &(from, to) in &best {
            self.increment(from, to);
        }
        best.len()
    }
}
