//! Transit evaluators: the quantity a dimension accumulates along an arc.
//!
//! Each evaluator is a pure function of `(from, to)` location indices,
//! registered once per dimension (or cost model) at setup.

use crate::distance::IntMatrix;

/// Quantity added to a cumulative variable when travelling `from -> to`.
pub trait TransitFn: Send + Sync {
    fn transit(&self, from: usize, to: usize) -> i64;
}

/// Matrix lookup: `matrix[from][to]`.
///
/// Used for the distance dimension and for arc costs.
#[derive(Debug, Clone, Copy)]
pub struct MatrixTransit<'a> {
    matrix: &'a IntMatrix,
}

impl<'a> MatrixTransit<'a> {
    pub fn new(matrix: &'a IntMatrix) -> Self {
        Self { matrix }
    }
}

impl TransitFn for MatrixTransit<'_> {
    #[inline]
    fn transit(&self, from: usize, to: usize) -> i64 {
        self.matrix.get(from, to)
    }
}

/// Unary transit: the demand served at the origin of the arc.
#[derive(Debug, Clone)]
pub struct DemandTransit {
    demands: Vec<i64>,
}

impl DemandTransit {
    pub fn new(demands: Vec<i64>) -> Self {
        Self { demands }
    }
}

impl TransitFn for DemandTransit {
    #[inline]
    fn transit(&self, from: usize, _to: usize) -> i64 {
        self.demands[from]
    }
}

/// Travel time plus the service duration at the origin of the arc.
#[derive(Debug, Clone)]
pub struct ServiceTimeTransit<'a> {
    times: &'a IntMatrix,
    service: Vec<i64>,
}

impl<'a> ServiceTimeTransit<'a> {
    pub fn new(times: &'a IntMatrix, service: Vec<i64>) -> Self {
        Self { times, service }
    }
}

impl TransitFn for ServiceTimeTransit<'_> {
    #[inline]
    fn transit(&self, from: usize, to: usize) -> i64 {
        self.times.get(from, to) + self.service[from]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> IntMatrix {
        IntMatrix::from_rows(&[vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]]).expect("square")
    }

    #[test]
    fn test_matrix_transit() {
        let m = matrix();
        let t = MatrixTransit::new(&m);
        assert_eq!(t.transit(0, 2), 8);
        assert_eq!(t.transit(2, 1), 4);
    }

    #[test]
    fn test_demand_transit_uses_origin() {
        let t = DemandTransit::new(vec![0, 10, 20]);
        assert_eq!(t.transit(1, 2), 10);
        assert_eq!(t.transit(2, 0), 20);
        assert_eq!(t.transit(0, 1), 0);
    }

    #[test]
    fn test_service_time_transit() {
        let m = matrix();
        let t = ServiceTimeTransit::new(&m, vec![0, 3, 7]);
        assert_eq!(t.transit(0, 1), 5);
        assert_eq!(t.transit(1, 2), 4 + 3);
        assert_eq!(t.transit(2, 0), 8 + 7);
    }
}
