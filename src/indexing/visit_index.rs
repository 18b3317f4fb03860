//! Visit arena indexing.
//!
//! Handles are laid out as `[ordinary visits | vehicle starts | vehicle ends]`.
//! Ordinary visits keep the relative order of their locations, so handle
//! order matches location order and scans over visits are deterministic.

/// Integer handle of a search-time visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisitId(usize);

impl VisitId {
    /// Position of this visit in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a visit handle stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    /// A non-depot location.
    Ordinary,
    /// The depot departure of the given vehicle.
    Start(usize),
    /// The depot return of the given vehicle.
    End(usize),
}

/// Bidirectional map between locations and visit handles.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::indexing::{VisitIndex, VisitKind};
///
/// // 4 locations, depot at index 1, 2 vehicles.
/// let index = VisitIndex::new(4, 2, 1);
/// assert_eq!(index.num_visits(), 3 + 2 * 2);
///
/// let start = index.start(1);
/// assert_eq!(index.location_of(start), 1);
/// assert_eq!(index.kind(start), VisitKind::Start(1));
///
/// assert_eq!(index.visits_of(1).len(), 4);
/// assert_eq!(index.visits_of(3).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct VisitIndex {
    visit_to_location: Vec<usize>,
    location_to_visit: Vec<Option<VisitId>>,
    num_ordinary: usize,
    num_vehicles: usize,
    depot: usize,
}

impl VisitIndex {
    /// Builds the arena for `num_locations` locations (depot included) and
    /// `num_vehicles` vehicles.
    ///
    /// # Panics
    ///
    /// Panics if `depot >= num_locations`.
    pub fn new(num_locations: usize, num_vehicles: usize, depot: usize) -> Self {
        assert!(
            depot < num_locations,
            "depot index {} out of range for {} locations",
            depot,
            num_locations
        );
        let num_ordinary = num_locations - 1;
        let mut visit_to_location = Vec::with_capacity(num_ordinary + 2 * num_vehicles);
        let mut location_to_visit = vec![None; num_locations];

        for (location, slot) in location_to_visit.iter_mut().enumerate() {
            if location == depot {
                continue;
            }
            *slot = Some(VisitId(visit_to_location.len()));
            visit_to_location.push(location);
        }
        visit_to_location.extend(std::iter::repeat(depot).take(2 * num_vehicles));

        Self {
            visit_to_location,
            location_to_visit,
            num_ordinary,
            num_vehicles,
            depot,
        }
    }

    /// Total number of visit handles.
    pub fn num_visits(&self) -> usize {
        self.visit_to_location.len()
    }

    /// Number of ordinary (non-depot) visits.
    pub fn num_ordinary(&self) -> usize {
        self.num_ordinary
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Location underlying a visit.
    #[inline]
    pub fn location_of(&self, visit: VisitId) -> usize {
        self.visit_to_location[visit.0]
    }

    /// All visits standing for a location: one for a regular location, every
    /// vehicle's start and end for the depot.
    pub fn visits_of(&self, location: usize) -> Vec<VisitId> {
        if location == self.depot {
            return (self.num_ordinary..self.num_visits()).map(VisitId).collect();
        }
        self.location_to_visit
            .get(location)
            .copied()
            .flatten()
            .into_iter()
            .collect()
    }

    /// The single visit of a non-depot location.
    pub fn visit_of(&self, location: usize) -> Option<VisitId> {
        self.location_to_visit.get(location).copied().flatten()
    }

    /// Depot departure visit of a vehicle.
    #[inline]
    pub fn start(&self, vehicle: usize) -> VisitId {
        debug_assert!(vehicle < self.num_vehicles);
        VisitId(self.num_ordinary + vehicle)
    }

    /// Depot return visit of a vehicle.
    #[inline]
    pub fn end(&self, vehicle: usize) -> VisitId {
        debug_assert!(vehicle < self.num_vehicles);
        VisitId(self.num_ordinary + self.num_vehicles + vehicle)
    }

    pub fn kind(&self, visit: VisitId) -> VisitKind {
        let i = visit.0;
        if i < self.num_ordinary {
            VisitKind::Ordinary
        } else if i < self.num_ordinary + self.num_vehicles {
            VisitKind::Start(i - self.num_ordinary)
        } else {
            VisitKind::End(i - self.num_ordinary - self.num_vehicles)
        }
    }

    /// Ordinary visits in location order.
    pub fn ordinary_visits(&self) -> impl Iterator<Item = VisitId> {
        (0..self.num_ordinary).map(VisitId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depot_first() {
        let index = VisitIndex::new(3, 2, 0);
        assert_eq!(index.num_ordinary(), 2);
        assert_eq!(index.num_visits(), 6);
        let ordinary: Vec<usize> = index
            .ordinary_visits()
            .map(|v| index.location_of(v))
            .collect();
        assert_eq!(ordinary, vec![1, 2]);
        assert_eq!(index.location_of(index.start(0)), 0);
        assert_eq!(index.location_of(index.end(1)), 0);
    }

    #[test]
    fn test_depot_in_middle() {
        let index = VisitIndex::new(4, 1, 2);
        let ordinary: Vec<usize> = index
            .ordinary_visits()
            .map(|v| index.location_of(v))
            .collect();
        assert_eq!(ordinary, vec![0, 1, 3]);
        assert_eq!(index.visit_of(2), None);
        assert_eq!(index.visit_of(3), Some(VisitId(2)));
    }

    #[test]
    fn test_location_of_is_total() {
        let index = VisitIndex::new(5, 3, 4);
        for i in 0..index.num_visits() {
            let loc = index.location_of(VisitId(i));
            assert!(loc < 5);
        }
    }

    #[test]
    fn test_visits_of_roundtrip() {
        let index = VisitIndex::new(5, 3, 0);
        for location in 1..5 {
            let visits = index.visits_of(location);
            assert_eq!(visits.len(), 1);
            assert_eq!(index.location_of(visits[0]), location);
            assert_eq!(index.kind(visits[0]), VisitKind::Ordinary);
        }
        let depot_visits = index.visits_of(0);
        assert_eq!(depot_visits.len(), 6);
        assert!(depot_visits
            .iter()
            .all(|&v| index.kind(v) != VisitKind::Ordinary));
    }

    #[test]
    fn test_start_end_kinds() {
        let index = VisitIndex::new(3, 2, 0);
        assert_eq!(index.kind(index.start(0)), VisitKind::Start(0));
        assert_eq!(index.kind(index.start(1)), VisitKind::Start(1));
        assert_eq!(index.kind(index.end(0)), VisitKind::End(0));
        assert_eq!(index.kind(index.end(1)), VisitKind::End(1));
        assert_ne!(index.start(1), index.end(0));
    }

    #[test]
    fn test_visits_of_out_of_range() {
        let index = VisitIndex::new(3, 1, 0);
        assert!(index.visits_of(10).is_empty());
    }
}
