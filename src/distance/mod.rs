//! Distance and travel time matrices.
//!
//! Provides a dense integer matrix used for both travel distance and
//! travel time between locations.

mod matrix;

pub use matrix::IntMatrix;
