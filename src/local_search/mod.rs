//! Local search neighborhoods over a [`RoutePlan`].
//!
//! - [`relocate`] — move one visit within or across routes
//! - [`exchange`] — swap two visits within or across routes
//! - [`two_opt`] — reverse a segment of one route
//! - [`or_opt`] — move a chain of two or three visits
//! - [`cross_exchange`] — swap route tails (2-opt*)
//!
//! Operators never touch the plan. They build candidate visit sequences in
//! scratch buffers and hand them to a [`MoveScanner`], which prices them
//! under the augmented (penalized) objective, checks feasibility of the
//! improving ones, and keeps the single best move of the scan.
//!
//! A scanner may carry a deadline. Once it passes, every further move is
//! rejected unpriced and the operators return early, so a long scan on a
//! large instance cannot overrun the search budget by more than a few
//! hundred candidates.

pub mod cross_exchange;
pub mod exchange;
pub mod or_opt;
pub mod relocate;
pub mod two_opt;

use std::time::Instant;

use crate::config::Operator;
use crate::evaluation::RouteEvaluator;
use crate::indexing::VisitId;
use crate::search::{ArcPenalties, RouteCost, RoutePlan};

/// A feasible improving move found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Neighborhood that produced the move.
    pub operator: Operator,
    /// Change in true objective.
    pub actual_delta: i64,
    /// Change in augmented objective.
    pub augmented_delta: i64,
    /// New visit sequence for every vehicle the move touches.
    pub changes: Vec<(usize, Vec<VisitId>)>,
}

impl Candidate {
    fn key(&self) -> (i64, i64) {
        (self.augmented_delta, self.actual_delta)
    }
}

/// Candidates priced between two reads of the clock.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Best-improvement accumulator for one pass over the neighborhoods.
///
/// A move improves when its augmented delta is negative, or zero with a
/// negative true delta. Among improving feasible moves the smallest
/// `(augmented, actual)` delta wins; the first one found wins ties.
pub struct MoveScanner<'s, 'a> {
    evaluator: &'s RouteEvaluator<'a>,
    penalties: &'s ArcPenalties,
    plan: &'s RoutePlan,
    costs: &'s [RouteCost],
    best: Option<Candidate>,
    evaluated: usize,
    deadline: Option<Instant>,
    expired: bool,
}

impl<'s, 'a> MoveScanner<'s, 'a> {
    /// `costs[v]` must be the current cost of `plan.route(v)`.
    pub fn new(
        evaluator: &'s RouteEvaluator<'a>,
        penalties: &'s ArcPenalties,
        plan: &'s RoutePlan,
        costs: &'s [RouteCost],
    ) -> Self {
        debug_assert_eq!(plan.num_vehicles(), costs.len());
        Self {
            evaluator,
            penalties,
            plan,
            costs,
            best: None,
            evaluated: 0,
            deadline: None,
            expired: false,
        }
    }

    /// Stops pricing moves once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// The plan being scanned.
    pub fn plan(&self) -> &'s RoutePlan {
        self.plan
    }

    /// Whether the deadline was seen to pass during this scan.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Prices a move that replaces the listed vehicles' routes, and keeps it
    /// if it is improving, feasible, and better than the current best.
    ///
    /// Returns `true` if the move became the new best. Always `false` once
    /// the deadline has passed.
    pub fn consider(&mut self, operator: Operator, changes: &[(usize, &[VisitId])]) -> bool {
        if self.expired {
            return false;
        }
        if self.evaluated % DEADLINE_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            self.expired = true;
            return false;
        }
        self.evaluated += 1;

        let mut actual_delta = 0i64;
        let mut augmented_delta = 0i64;
        for &(vehicle, route) in changes {
            let after = self.penalties.route_cost(self.evaluator, route);
            let before = self.costs[vehicle];
            actual_delta += after.actual - before.actual;
            augmented_delta = augmented_delta.saturating_add(after.augmented - before.augmented);
        }

        let improving = augmented_delta < 0 || (augmented_delta == 0 && actual_delta < 0);
        if !improving {
            return false;
        }
        if let Some(best) = &self.best {
            if (augmented_delta, actual_delta) >= best.key() {
                return false;
            }
        }
        if changes
            .iter()
            .any(|&(vehicle, route)| self.evaluator.check(vehicle, route).is_err())
        {
            return false;
        }

        self.best = Some(Candidate {
            operator,
            actual_delta,
            augmented_delta,
            changes: changes.iter().map(|&(v, r)| (v, r.to_vec())).collect(),
        });
        true
    }

    /// Consumes the scanner, returning the best move found.
    pub fn into_best(self) -> Option<Candidate> {
        self.best
    }
}

/// Runs one neighborhood over every vehicle in `order`.
pub fn scan(operator: Operator, scanner: &mut MoveScanner<'_, '_>, order: &[usize]) {
    match operator {
        Operator::Relocate => relocate::scan(scanner, order),
        Operator::Exchange => exchange::scan(scanner, order),
        Operator::TwoOpt => two_opt::scan(scanner, order),
        Operator::OrOpt => or_opt::scan(scanner, order),
        Operator::CrossExchange => cross_exchange::scan(scanner, order),
    }
}

/// Copies `route` into `buf` with `items` inserted before position `at`.
fn splice_into(buf: &mut Vec<VisitId>, route: &[VisitId], at: usize, items: &[VisitId]) {
    buf.clear();
    buf.extend_from_slice(&route[..at]);
    buf.extend_from_slice(items);
    buf.extend_from_slice(&route[at..]);
}

/// Copies `route` into `buf` without the `len` visits starting at `at`.
fn cut_out(buf: &mut Vec<VisitId>, route: &[VisitId], at: usize, len: usize) {
    buf.clear();
    buf.extend_from_slice(&route[..at]);
    buf.extend_from_slice(&route[at + len..]);
}
