//! Mutable route plan used during search.

use crate::indexing::{VisitId, VisitIndex};

/// One visit sequence per vehicle, each running from the vehicle's start
/// visit to its end visit. An unused vehicle holds just `[start, end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    routes: Vec<Vec<VisitId>>,
}

impl RoutePlan {
    /// A plan where every vehicle stays at the depot.
    pub fn empty(index: &VisitIndex) -> Self {
        let routes = (0..index.num_vehicles())
            .map(|v| vec![index.start(v), index.end(v)])
            .collect();
        Self { routes }
    }

    /// Wraps explicit visit sequences, one per vehicle.
    pub fn from_routes(routes: Vec<Vec<VisitId>>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Vec<VisitId>] {
        &self.routes
    }

    /// Visit sequence of a vehicle.
    pub fn route(&self, vehicle: usize) -> &[VisitId] {
        &self.routes[vehicle]
    }

    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the vehicle serves at least one location.
    pub fn is_used(&self, vehicle: usize) -> bool {
        self.routes[vehicle].len() > 2
    }

    /// Number of vehicles serving at least one location.
    pub fn num_used(&self) -> usize {
        (0..self.routes.len()).filter(|&v| self.is_used(v)).count()
    }

    /// Number of locations served across all vehicles.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len().saturating_sub(2)).sum()
    }

    /// Inserts `visit` so that it sits at `position` in the vehicle's route.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= position < route length`, which keeps the start
    /// and end visits in place.
    pub fn insert(&mut self, vehicle: usize, position: usize, visit: VisitId) {
        let route = &mut self.routes[vehicle];
        assert!(position >= 1 && position < route.len(), "insert outside route interior");
        route.insert(position, visit);
    }

    /// Replaces a vehicle's whole visit sequence.
    pub fn replace(&mut self, vehicle: usize, route: Vec<VisitId>) {
        self.routes[vehicle] = route;
    }
}
