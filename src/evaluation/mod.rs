//! Route evaluation: arc and vehicle costs, feasibility, and plan
//! verification.

mod cost;
mod evaluator;

pub use cost::CostModel;
pub use evaluator::{RouteEvaluator, Violation};
