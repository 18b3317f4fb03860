//! Relocate: move a single visit.
//!
//! # Algorithm
//!
//! For each visit, remove it from its route and try every other insertion
//! position, both in its own route and in every other vehicle's route
//! (including unused vehicles, which opens a new route).
//!
//! # Complexity
//!
//! O(n × (n + V)) candidates per scan, each priced in O(route length).
//!
//! # Reference
//!
//! Savelsbergh, M.W.P. (1992). "The Vehicle Routing Problem with Time Windows:
//! Minimizing Route Duration", *ORSA Journal on Computing* 4(2), 146-154.

use crate::config::Operator;

use super::{cut_out, splice_into, MoveScanner};

/// Scans every relocate move over the vehicles in `order`.
pub fn scan(scanner: &mut MoveScanner<'_, '_>, order: &[usize]) {
    let plan = scanner.plan();
    let mut removed = Vec::new();
    let mut moved = Vec::new();

    for &from_v in order {
        let from = plan.route(from_v);
        for i in 1..from.len() - 1 {
            if scanner.is_expired() {
                return;
            }
            let visit = [from[i]];
            cut_out(&mut removed, from, i, 1);

            for &to_v in order {
                if to_v == from_v {
                    for j in 1..removed.len() {
                        if j == i {
                            continue;
                        }
                        splice_into(&mut moved, &removed, j, &visit);
                        scanner.consider(Operator::Relocate, &[(from_v, moved.as_slice())]);
                    }
                } else {
                    let to = plan.route(to_v);
                    for j in 1..to.len() {
                        splice_into(&mut moved, to, j, &visit);
                        scanner.consider(
                            Operator::Relocate,
                            &[(from_v, removed.as_slice()), (to_v, moved.as_slice())],
                        );
                    }
                }
            }
        }
    }
}
