//! Shared domain types.
//!
//! These types are intentionally kept small, `Copy` where possible and
//! serializable so they can be:
//!
//! - passed by value into and out of a fit
//! - stored alongside the canonical fit string
//! - loaded from configuration files

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    x: f64,
    y: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for SamplePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Renders as `(x,y)` using the shortest round-trip form of each number.
impl fmt::Display for SamplePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// How coefficients are rendered in the canonical string.
///
/// Equality between fits is equality of their canonical strings, so two fits
/// rendered with different formats can compare unequal even when they describe
/// the same polynomial. `Display` always uses [`CoefficientFormat::Shortest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientFormat {
    /// Shortest text that parses back to the identical `f64`.
    #[default]
    Shortest,
    /// Fixed number of fractional digits for every coefficient.
    ///
    /// `u16` is the largest precision the standard formatter accepts.
    Fixed(u16),
}

impl CoefficientFormat {
    pub(crate) fn render(self, value: f64) -> String {
        match self {
            CoefficientFormat::Shortest => value.to_string(),
            CoefficientFormat::Fixed(digits) => {
                let digits = usize::from(digits);
                format!("{value:.digits$}")
            }
        }
    }
}

/// Fitting options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Largest pivot magnitude still treated as singular.
    ///
    /// `0.0` (the default) only rejects an exactly-zero pivot. Nearly
    /// duplicated x values then still solve, but can produce huge and
    /// meaningless coefficients. A positive tolerance rejects those systems
    /// instead.
    pub pivot_tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            pivot_tolerance: 0.0,
        }
    }
}

impl FitOptions {
    /// Options that reject any pivot with `|p| <= tolerance`.
    pub fn with_pivot_tolerance(tolerance: f64) -> Self {
        Self {
            pivot_tolerance: tolerance.abs(),
        }
    }
}
