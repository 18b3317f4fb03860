//! Or-opt: move a chain of consecutive visits.
//!
//! # Algorithm
//!
//! Chains of two or three consecutive visits are cut out and reinserted, in
//! their original orientation, at every other position of the same route
//! or of another vehicle's route. Single visits are left to relocate.
//!
//! # Complexity
//!
//! O(n × (n + V)) candidates per chain length.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::config::Operator;

use super::{cut_out, splice_into, MoveScanner};

/// Chain lengths tried, shortest first.
const CHAIN_LENGTHS: [usize; 2] = [2, 3];

/// Scans every chain move over the vehicles in `order`.
pub fn scan(scanner: &mut MoveScanner<'_, '_>, order: &[usize]) {
    let plan = scanner.plan();
    let mut removed = Vec::new();
    let mut moved = Vec::new();

    for &from_v in order {
        let from = plan.route(from_v);
        for len in CHAIN_LENGTHS {
            if from.len() < len + 2 {
                continue;
            }
            for i in 1..from.len() - len {
                if scanner.is_expired() {
                    return;
                }
                let chain = &from[i..i + len];
                cut_out(&mut removed, from, i, len);

                for &to_v in order {
                    if to_v == from_v {
                        for j in 1..removed.len() {
                            if j == i {
                                continue;
                            }
                            splice_into(&mut moved, &removed, j, chain);
                            scanner.consider(Operator::OrOpt, &[(from_v, moved.as_slice())]);
                        }
                    } else {
                        let to = plan.route(to_v);
                        for j in 1..to.len() {
                            splice_into(&mut moved, to, j, chain);
                            scanner.consider(
                                Operator::OrOpt,
                                &[(from_v, removed.as_slice()), (to_v, moved.as_slice())],
                            );
                        }
                    }
                }
            }
        }
    }
}
