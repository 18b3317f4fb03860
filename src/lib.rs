//! # fleet-dispatch
//!
//! Fleet dispatch planning for a single depot: serve every location exactly
//! once with a fleet of capacitated vehicles, respecting time windows and
//! optional per-vehicle distance caps, at minimum total distance plus a
//! fixed cost per dispatched vehicle.
//!
//! A solve builds a first plan by parallel cheapest insertion and improves
//! it with guided local search (relocate, exchange, 2-opt, or-opt, and
//! cross-exchange neighborhoods) until its time budget runs out or the
//! search stalls.
//!
//! ## Modules
//!
//! - [`models`] — Request and result types (Location, Vehicle, ProblemInstance, Solution)
//! - [`distance`] — Dense integer distance and travel time matrices
//! - [`indexing`] — Visit handles for locations and per-vehicle depot copies
//! - [`dimensions`] — Capacity, time, and distance-cap propagation
//! - [`evaluation`] — Route cost, feasibility, and full-plan verification
//! - [`constructive`] — Infeasibility screening and cheapest insertion
//! - [`local_search`] — Neighborhood operators and the best-move scanner
//! - [`search`] — Guided local search with arc penalties
//! - [`extraction`] — Schedules and loads for the reported solution
//! - [`config`] — Search parameters
//! - [`error`] — Validation and solve errors
//!
//! ## Quick start
//!
//! ```
//! use fleet_dispatch::models::{Location, ProblemInstance, Vehicle};
//!
//! let distances = vec![
//!     vec![0, 5, 8],
//!     vec![5, 0, 4],
//!     vec![8, 4, 0],
//! ];
//! let instance = ProblemInstance::new(
//!     vec![
//!         Location::new(0).with_name("Depot"),
//!         Location::new(1).with_demand(10),
//!         Location::new(2).with_demand(10),
//!     ],
//!     vec![Vehicle::new(0, 100)],
//!     distances.clone(),
//!     distances,
//! )
//! .with_time_limit_seconds(1);
//!
//! let solution = fleet_dispatch::solve(&instance).unwrap();
//! assert_eq!(solution.total_distance, 17);
//! assert_eq!(solution.num_served(), 2);
//! ```

pub mod config;
pub mod constructive;
pub mod dimensions;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod indexing;
pub mod local_search;
pub mod models;
pub mod search;
mod solver;

pub use config::{FirstSolutionStrategy, Operator, SolverConfig};
pub use error::{ConstraintClass, ConstraintKind, SolveError, SolveResult, ValidationError};
pub use solver::{solve, solve_with_config};
