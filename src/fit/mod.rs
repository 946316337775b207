//! Curve-fit value.
//!
//! Responsibilities:
//!
//! - build a fit from points, raw rows or a point list string
//! - evaluate it with clamping at the sampled bounds
//! - expose coefficients, bounds and the failure reason

pub mod curve_fit;

pub use curve_fit::*;
