//! Route evaluator that ties the visit index, constraint dimensions, and cost
//! model together.

use crate::dimensions::Dimensions;
use crate::error::ConstraintKind;
use crate::indexing::{VisitId, VisitIndex, VisitKind};
use crate::models::ProblemModel;
use crate::search::RoutePlan;

use super::CostModel;

/// A problem with a produced plan, found by [`RouteEvaluator::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A location is not on any route.
    Missing { location: usize },
    /// A location appears more than once across routes.
    Duplicate { location: usize },
    /// A route does not open with its own start and close with its own end,
    /// or carries a depot visit in between.
    MalformedRoute { vehicle: usize },
    /// A dimension cannot be kept within bounds along a route.
    Constraint {
        vehicle: usize,
        kind: ConstraintKind,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { location } => write!(f, "location {location} is not served"),
            Self::Duplicate { location } => write!(f, "location {location} is served more than once"),
            Self::MalformedRoute { vehicle } => {
                write!(f, "route of vehicle {vehicle} is not anchored at its depot visits")
            }
            Self::Constraint { vehicle, kind } => {
                write!(f, "route of vehicle {vehicle} violates the {kind} constraint")
            }
        }
    }
}

/// Everything needed to judge a route: which location each visit stands
/// for, whether a visit sequence is feasible, and what it costs.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::evaluation::RouteEvaluator;
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let model = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_demand(10), Location::new(2).with_demand(20)],
///     vec![Vehicle::new(0, 100)],
///     rows.clone(),
///     rows,
/// )
/// .validate()
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// let index = evaluator.index();
/// let route: Vec<_> = vec![index.start(0), index.visits_of(1)[0], index.visits_of(2)[0], index.end(0)];
/// assert!(evaluator.check(0, &route).is_ok());
/// assert_eq!(evaluator.route_cost(&route), 17);
/// ```
#[derive(Debug)]
pub struct RouteEvaluator<'a> {
    model: &'a ProblemModel,
    index: VisitIndex,
    dimensions: Dimensions<'a>,
    cost: CostModel<'a>,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(model: &'a ProblemModel) -> Self {
        Self {
            model,
            index: VisitIndex::new(model.num_locations(), model.num_vehicles(), model.depot()),
            dimensions: Dimensions::new(model),
            cost: CostModel::new(model),
        }
    }

    pub fn model(&self) -> &'a ProblemModel {
        self.model
    }

    pub fn index(&self) -> &VisitIndex {
        &self.index
    }

    pub fn dimensions(&self) -> &Dimensions<'a> {
        &self.dimensions
    }

    pub fn cost(&self) -> &CostModel<'a> {
        &self.cost
    }

    /// Locations along a visit sequence.
    pub fn locations<'r>(&'r self, route: &'r [VisitId]) -> impl Iterator<Item = usize> + Clone + 'r {
        route.iter().map(move |&v| self.index.location_of(v))
    }

    /// Checks every dimension along a visit sequence driven by `vehicle`.
    #[inline]
    pub fn check(&self, vehicle: usize, route: &[VisitId]) -> Result<(), ConstraintKind> {
        self.dimensions.check(vehicle, self.locations(route))
    }

    /// Arc cost of a visit sequence plus the fixed vehicle cost if it is used.
    pub fn route_cost(&self, route: &[VisitId]) -> i64 {
        self.cost.path_cost(self.locations(route))
    }

    /// Arc cost of a visit sequence.
    pub fn route_distance(&self, route: &[VisitId]) -> i64 {
        self.cost.path_distance(self.locations(route))
    }

    /// Objective of a whole plan.
    pub fn objective(&self, plan: &RoutePlan) -> i64 {
        plan.routes().iter().map(|r| self.route_cost(r)).sum()
    }

    /// Re-checks a plan from scratch.
    ///
    /// Every non-depot location must be served exactly once, every route must
    /// run from its vehicle's start to its vehicle's end, and every dimension
    /// must hold. Returns all violations found.
    pub fn verify(&self, plan: &RoutePlan) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut served = vec![0usize; self.model.num_locations()];

        for (vehicle, route) in plan.routes().iter().enumerate() {
            let anchored = route.len() >= 2
                && route.first() == Some(&self.index.start(vehicle))
                && route.last() == Some(&self.index.end(vehicle))
                && route[1..route.len() - 1]
                    .iter()
                    .all(|&v| self.index.kind(v) == VisitKind::Ordinary);
            if !anchored {
                violations.push(Violation::MalformedRoute { vehicle });
                continue;
            }
            for &visit in &route[1..route.len() - 1] {
                served[self.index.location_of(visit)] += 1;
            }
            if let Err(kind) = self.check(vehicle, route) {
                violations.push(Violation::Constraint { vehicle, kind });
            }
        }

        for (location, &count) in served.iter().enumerate() {
            if location == self.model.depot() {
                continue;
            }
            match count {
                1 => {}
                0 => violations.push(Violation::Missing { location }),
                _ => violations.push(Violation::Duplicate { location }),
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, ProblemInstance, Vehicle};

    fn model() -> ProblemModel {
        let rows = vec![
            vec![0, 5, 8, 6],
            vec![5, 0, 4, 7],
            vec![8, 4, 0, 3],
            vec![6, 7, 3, 0],
        ];
        ProblemInstance::new(
            vec![
                Location::new(0),
                Location::new(1).with_demand(10),
                Location::new(2).with_demand(20),
                Location::new(3).with_demand(15),
            ],
            vec![Vehicle::new(0, 30), Vehicle::new(1, 30)],
            rows.clone(),
            rows,
        )
        .validate()
        .expect("valid")
    }

    fn visit(eval: &RouteEvaluator<'_>, location: usize) -> VisitId {
        eval.index().visit_of(location).expect("ordinary")
    }

    #[test]
    fn test_route_cost_and_distance() {
        let m = model();
        let eval = RouteEvaluator::new(&m);
        let idx = eval.index();
        let route = vec![idx.start(0), visit(&eval, 1), visit(&eval, 2), idx.end(0)];
        assert_eq!(eval.route_distance(&route), 17);
        assert_eq!(eval.route_cost(&route), 17);
        assert_eq!(eval.route_cost(&[idx.start(1), idx.end(1)]), 0);
    }

    #[test]
    fn test_check_reports_capacity() {
        let m = model();
        let eval = RouteEvaluator::new(&m);
        let idx = eval.index();
        let route = vec![
            idx.start(0),
            visit(&eval, 1),
            visit(&eval, 2),
            visit(&eval, 3),
            idx.end(0),
        ];
        assert_eq!(eval.check(0, &route), Err(ConstraintKind::Capacity));
    }

    #[test]
    fn test_verify_clean_plan() {
        let m = model();
        let eval = RouteEvaluator::new(&m);
        let idx = eval.index();
        let plan = RoutePlan::from_routes(vec![
            vec![idx.start(0), visit(&eval, 1), visit(&eval, 2), idx.end(0)],
            vec![idx.start(1), visit(&eval, 3), idx.end(1)],
        ]);
        assert!(eval.verify(&plan).is_empty());
        assert_eq!(eval.objective(&plan), 17 + 12);
    }

    #[test]
    fn test_verify_missing_and_duplicate() {
        let m = model();
        let eval = RouteEvaluator::new(&m);
        let idx = eval.index();
        let plan = RoutePlan::from_routes(vec![
            vec![idx.start(0), visit(&eval, 1), idx.end(0)],
            vec![idx.start(1), visit(&eval, 1), idx.end(1)],
        ]);
        let violations = eval.verify(&plan);
        assert!(violations.contains(&Violation::Duplicate { location: 1 }));
        assert!(violations.contains(&Violation::Missing { location: 2 }));
        assert!(violations.contains(&Violation::Missing { location: 3 }));
    }

    #[test]
    fn test_verify_wrong_anchor() {
        let m = model();
        let eval = RouteEvaluator::new(&m);
        let idx = eval.index();
        let plan = RoutePlan::from_routes(vec![
            vec![idx.start(1), visit(&eval, 1), visit(&eval, 2), idx.end(0)],
            vec![idx.start(1), visit(&eval, 3), idx.end(1)],
        ]);
        let violations = eval.verify(&plan);
        assert_eq!(violations[0], Violation::MalformedRoute { vehicle: 0 });
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::Constraint {
            vehicle: 2,
            kind: ConstraintKind::TimeWindow,
        };
        assert_eq!(v.to_string(), "route of vehicle 2 violates the time window constraint");
    }
}
