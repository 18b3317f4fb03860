//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j` inside a route, reverse the segment
//! `r[i..=j]`, replacing arcs `(r[i-1], r[i])` and `(r[j], r[j+1])` with
//! `(r[i-1], r[j])` and `(r[i], r[j+1])`. The whole route is re-priced and
//! re-checked, so asymmetric matrices and time windows are handled exactly.
//!
//! # Complexity
//!
//! O(n²) candidates per route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::config::Operator;

use super::MoveScanner;

/// Scans every segment reversal over the vehicles in `order`.
pub fn scan(scanner: &mut MoveScanner<'_, '_>, order: &[usize]) {
    let plan = scanner.plan();
    let mut buf = Vec::new();

    for &v in order {
        let route = plan.route(v);
        if route.len() < 4 {
            continue;
        }
        for i in 1..route.len() - 2 {
            if scanner.is_expired() {
                return;
            }
            for j in i + 1..route.len() - 1 {
                buf.clear();
                buf.extend_from_slice(route);
                buf[i..=j].reverse();
                scanner.consider(Operator::TwoOpt, &[(v, buf.as_slice())]);
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
    fn test_uncrosses_route() {
        let m = line_model(100, 1);
        let eval = RouteEvaluator::new(&m);
        // 0 -> 1 -> 3 -> 2 -> 4 -> 0 = 10 + 20 + 10 + 20 + 40 = 100.
        let plan = plan_of(&eval, &[&[1, 3, 2, 4]]);
        let mv = best_move(&eval, &plan, Operator::TwoOpt).expect("improving");
        assert_eq!(mv.actual_delta, -20);
        assert_eq!(locations_of(&eval, &mv.changes[0].1), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_short_routes_skipped() {
        let m = line_model(100, 2);
        let eval = RouteEvaluator::new(&m);
        let plan = plan_of(&eval, &[&[4], &[]]);
        assert!(best_move(&eval, &plan, Operator::TwoOpt).is_none());
    }

    #[test]
    fn test_optimal_route_has_no_move() {
        let m = line_model(100, 1);
        let eval = RouteEvaluator::new(&m);
        let plan = plan_of(&eval, &[&[1, 2, 3, 4]]);
        assert!(best_move(&eval, &plan, Operator::TwoOpt).is_none());
    }
}
