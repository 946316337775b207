//! Mathematical utilities: interpolation system build and Gaussian elimination.

pub mod gauss;

pub use gauss::*;
