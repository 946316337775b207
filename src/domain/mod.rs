//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the sample point value type (`SamplePoint`)
//! - fitting options (`FitOptions`)
//! - coefficient rendering for the canonical string (`CoefficientFormat`)

pub mod types;

pub use types::*;
