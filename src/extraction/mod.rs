//! Solution extraction: schedules, loads, and distances per dispatched
//! vehicle.

mod extractor;

pub use extractor::SolutionExtractor;
