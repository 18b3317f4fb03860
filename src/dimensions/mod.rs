//! Constraint dimensions: capacity, time, and optional distance caps.
//!
//! - [`Dimension`] — one cumulative quantity with per-location and
//!   per-vehicle bounds
//! - [`Dimensions`] — the set registered for a problem, checked together
//! - [`transit`] — pure `(from, to)` transit evaluators

mod dimension;
pub mod transit;

pub use dimension::Dimension;
pub use transit::TransitFn;

use crate::error::ConstraintKind;
use crate::models::ProblemModel;

/// All dimensions registered for one solve call.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::dimensions::Dimensions;
/// use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
///
/// let rows = vec![vec![0, 5, 8], vec![5, 0, 4], vec![8, 4, 0]];
/// let model = ProblemInstance::new(
///     vec![Location::new(0), Location::new(1).with_demand(60), Location::new(2).with_demand(60)],
///     vec![Vehicle::new(0, 100)],
///     rows.clone(),
///     rows,
/// )
/// .validate()
/// .unwrap();
///
/// let dims = Dimensions::new(&model);
/// assert!(dims.check(0, [0, 1, 0]).is_ok());
/// assert!(dims.check(0, [0, 1, 2, 0]).is_err());
/// ```
#[derive(Debug)]
pub struct Dimensions<'a> {
    capacity: Dimension<'a>,
    time: Dimension<'a>,
    distance: Option<Dimension<'a>>,
}

impl<'a> Dimensions<'a> {
    /// Registers the capacity and time dimensions, plus the distance
    /// dimension when any vehicle is capped.
    pub fn new(model: &'a ProblemModel) -> Self {
        Self {
            capacity: Dimension::capacity(model),
            time: Dimension::time(model),
            distance: Dimension::distance(model),
        }
    }

    pub fn capacity(&self) -> &Dimension<'a> {
        &self.capacity
    }

    pub fn time(&self) -> &Dimension<'a> {
        &self.time
    }

    pub fn distance(&self) -> Option<&Dimension<'a>> {
        self.distance.as_ref()
    }

    /// Iterates over every registered dimension in check order.
    pub fn iter(&self) -> impl Iterator<Item = &Dimension<'a>> {
        std::iter::once(&self.capacity)
            .chain(std::iter::once(&self.time))
            .chain(self.distance.iter())
    }

    /// Checks a full path of locations (start depot through end depot) for
    /// the given vehicle.
    ///
    /// Returns the kind of the first dimension that rejects it.
    pub fn check<I>(&self, vehicle: usize, path: I) -> Result<(), ConstraintKind>
    where
        I: IntoIterator<Item = usize>,
        I::IntoIter: Clone,
    {
        let path = path.into_iter();
        for dim in self.iter() {
            dim.walk(vehicle, path.clone(), |_| {})?;
        }
        Ok(())
    }
}
