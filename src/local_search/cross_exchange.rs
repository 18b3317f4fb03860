//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Given routes `R1 = [s₁, a₁, …, aᵢ₋₁ | aᵢ, …, aₙ, e₁]` and
//! `R2 = [s₂, b₁, …, bⱼ₋₁ | bⱼ, …, bₘ, e₂]`, cut both and swap tails:
//!
//! ```text
//! R1' = [s₁, a₁, …, aᵢ₋₁, bⱼ, …, bₘ, e₁]
//! R2' = [s₂, b₁, …, bⱼ₋₁, aᵢ, …, aₙ, e₂]
//! ```
//!
//! Either tail may be empty, so this also hands a whole route to an unused
//! vehicle.
//!
//! # Complexity
//!
//! O(n₁ × n₂) candidates per route pair.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::config::Operator;

use super::MoveScanner;

/// Scans every tail exchange over pairs of vehicles in `order`.
pub fn scan(scanner: &mut MoveScanner<'_, '_>, order: &[usize]) {
    let plan = scanner.plan();
    let mut first = Vec::new();
    let mut second = Vec::new();

    for (a, &v1) in order.iter().enumerate() {
        let r1 = plan.route(v1);
        for &v2 in &order[a + 1..] {
            if scanner.is_expired() {
                return;
            }
            let r2 = plan.route(v2);
            if r1.len() == 2 && r2.len() == 2 {
                continue;
            }
            let (end1, end2) = (r1.len() - 1, r2.len() - 1);
            for i in 1..=end1 {
                for j in 1..=end2 {
                    if i == end1 && j == end2 {
                        continue;
                    }
                    first.clear();
                    first.extend_from_slice(&r1[..i]);
                    first.extend_from_slice(&r2[j..end2]);
                    first.push(r1[end1]);

                    second.clear();
                    second.extend_from_slice(&r2[..j]);
                    second.extend_from_slice(&r1[i..end1]);
                    second.push(r2[end2]);

                    scanner.consider(
                        Operator::CrossExchange,
                        &[(v1, first.as_slice()), (v2, second.as_slice())],
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Operator;
    use crate::evaluation::RouteEvaluator;
    use crate::local_search::fixtures::*;

    #[test]
    fn test_swaps_tails() {
        let m = line_model(20, 2);
        let eval = RouteEvaluator::new(&m);
        // [1, 4] and [3, 2] cost 80 + 60; [1, 2] and [3, 4] cost 40 + 80.
        let plan = plan_of(&eval, &[&[1, 4], &[3, 2]]);
        let mv = best_move(&eval, &plan, Operator::CrossExchange).expect("improving");
        assert_eq!(mv.actual_delta, -20);
        let mut loads: Vec<usize> = mv.changes.iter().map(|(_, r)| r.len() - 2).collect();
        loads.sort_unstable();
        assert_eq!(loads, vec![2, 2]);
    }

    #[test]
    fn test_keeps_depot_anchors() {
        let m = line_model(20, 2);
        let eval = RouteEvaluator::new(&m);
        let plan = plan_of(&eval, &[&[1, 4], &[3, 2]]);
        let mv = best_move(&eval, &plan, Operator::CrossExchange).expect("improving");
        for (v, route) in &mv.changes {
            assert_eq!(route.first(), Some(&eval.index().start(*v)));
            assert_eq!(route.last(), Some(&eval.index().end(*v)));
        }
    }

    #[test]
    fn test_two_empty_routes_skipped() {
        let m = line_model(100, 3);
        let eval = RouteEvaluator::new(&m);
        let plan = plan_of(&eval, &[&[1, 2, 3, 4], &[], &[]]);
        assert!(best_move(&eval, &plan, Operator::CrossExchange).is_none());
    }
}
