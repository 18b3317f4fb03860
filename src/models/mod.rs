//! Domain model types for fleet dispatch problems.
//!
//! Provides the request-side types (locations with demands and time
//! windows, vehicles with capacity and distance caps, the problem instance
//! and its validated model) and the result-side types (routes, stops, and
//! the solution).

mod instance;
mod location;
mod route;
mod solution;
mod vehicle;

pub use instance::{ProblemInstance, ProblemModel, DEFAULT_TIME_LIMIT_SECONDS, MAX_INPUT_VALUE};
pub use location::{Location, TimeWindow, DEFAULT_TIME_WINDOW_END};
pub use route::{Route, Stop};
pub use solution::{SearchStatistics, Solution, SolveStatus, StopReason};
pub use vehicle::Vehicle;
