//! Improvement search over route plans.
//!
//! - [`RoutePlan`] — one visit sequence per vehicle
//! - [`ArcPenalties`] — guided local search arc penalties
//! - [`SearchEngine`] — construction, then penalized best-improvement
//!   descent until a stop condition holds

mod engine;
mod guided;
mod plan;

pub use engine::{SearchEngine, SearchOutcome};
pub use guided::{ArcPenalties, RouteCost};
pub use plan::RoutePlan;
