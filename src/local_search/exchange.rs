//! Exchange: swap two visits.
//!
//! # Algorithm
//!
//! Every unordered pair of visits swaps positions, whether they share a
//! route or not. Route lengths are preserved.
//!
//! # Complexity
//!
//! O(n²) candidates per scan.

use crate::config::Operator;

use super::MoveScanner;

/// Scans every exchange move over the vehicles in `order`.
pub fn scan(scanner: &mut MoveScanner<'_, '_>, order: &[usize]) {
    let plan = scanner.plan();
    let mut first = Vec::new();
    let mut second = Vec::new();

    for (a, &v1) in order.iter().enumerate() {
        let r1 = plan.route(v1);
        for &v2 in &order[a..] {
            if scanner.is_expired() {
                return;
            }
            let r2 = plan.route(v2);
            if v1 == v2 {
                for i in 1..r1.len() - 1 {
                    for j in i + 1..r1.len() - 1 {
                        first.clear();
                        first.extend_from_slice(r1);
                        first.swap(i, j);
                        scanner.consider(Operator::Exchange, &[(v1, first.as_slice())]);
                    }
                }
                continue;
            }
            for i in 1..r1.len() - 1 {
                for j in 1..r2.len() - 1 {
                    first.clear();
                    first.extend_from_slice(r1);
                    first[i] = r2[j];
                    second.clear();
                    second.extend_from_slice(r2);
                    second[j] = r1[i];
                    scanner.consider(
                        Operator::Exchange,
                        &[(v1, first.as_slice()), (v2, second.as_slice())],
                    );
                }
            }
        }
    }
}
