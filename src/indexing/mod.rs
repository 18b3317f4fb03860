//! Mapping between locations and search-time visit handles.
//!
//! The search operates on an arena of visits addressed by [`VisitId`]:
//! one ordinary visit per non-depot location, plus a start and an end
//! visit for each vehicle that both stand for the depot.

mod visit_index;

pub use visit_index::{VisitId, VisitIndex, VisitKind};
