//! Arc costs and fixed vehicle costs.

use crate::dimensions::transit::{MatrixTransit, TransitFn};
use crate::models::ProblemModel;

/// Objective terms: arc cost from the distance matrix, plus a fixed cost
/// for every dispatched vehicle.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::evaluation::CostModel;
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let model = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1), Location::new(2)],
///     vec![Vehicle::new(0, 100)],
///     rows.clone(),
///     rows,
/// )
/// .with_fixed_vehicle_cost(1_000)
/// .validate()
/// .unwrap();
///
/// let cost = CostModel::new(&model);
/// assert_eq!(cost.path_distance([0, 1, 2, 0]), 17);
/// assert_eq!(cost.path_cost([0, 1, 2, 0]), 1_017);
/// assert_eq!(cost.path_cost([0, 0]), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    arc: MatrixTransit<'a>,
    fixed_vehicle_cost: i64,
}

impl<'a> CostModel<'a> {
    pub fn new(model: &'a ProblemModel) -> Self {
        Self {
            arc: MatrixTransit::new(model.distances()),
            fixed_vehicle_cost: model.fixed_vehicle_cost(),
        }
    }

    /// Cost of travelling directly between two locations.
    #[inline]
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.arc.transit(from, to)
    }

    /// Fixed cost charged once per non-empty route.
    pub fn fixed_vehicle_cost(&self) -> i64 {
        self.fixed_vehicle_cost
    }

    /// Sum of arc costs along a path of locations.
    pub fn path_distance<I>(&self, path: I) -> i64
    where
        I: IntoIterator<Item = usize>,
    {
        let mut iter = path.into_iter();
        let Some(mut prev) = iter.next() else {
            return 0;
        };
        let mut total = 0;
        for next in iter {
            total += self.arc_cost(prev, next);
            prev = next;
        }
        total
    }

    /// Arc costs plus the fixed cost if the path visits anything between its
    /// start and end depot. An unused vehicle costs nothing.
    pub fn path_cost<I>(&self, path: I) -> i64
    where
        I: IntoIterator<Item = usize>,
    {
        let mut count = 0usize;
        let distance = self.path_distance(path.into_iter().inspect(|_| count += 1));
        if count > 2 {
            distance + self.fixed_vehicle_cost
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, ProblemInstance, Vehicle};

    fn model(fixed: i64) -> ProblemModel {
        let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
        ProblemInstance::new(
            vec![Location::new(0), Location::new(1), Location::new(2)],
            vec![Vehicle::new(0, 100)],
            rows.clone(),
            rows,
        )
        .with_fixed_vehicle_cost(fixed)
        .validate()
        .expect("valid")
    }

    #[test]
    fn test_arc_cost() {
        let m = model(0);
        let c = CostModel::new(&m);
        assert_eq!(c.arc_cost(0, 1), 5);
        assert_eq!(c.arc_cost(1, 2), 4);
    }

    #[test]
    fn test_path_distance_both_orders() {
        let m = model(0);
        let c = CostModel::new(&m);
        assert_eq!(c.path_distance([0, 1, 2, 0]), 17);
        assert_eq!(c.path_distance([0, 2, 1, 0]), 17);
        assert_eq!(c.path_distance([0]), 0);
        assert_eq!(c.path_distance(std::iter::empty()), 0);
    }

    #[test]
    fn test_fixed_cost_only_when_used() {
        let m = model(250);
        let c = CostModel::new(&m);
        assert_eq!(c.path_cost([0, 0]), 0);
        assert_eq!(c.path_cost([0, 1, 0]), 260);
    }
}
