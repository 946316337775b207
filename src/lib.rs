//! `curvefit` library crate.
//!
//! Fits the unique polynomial of degree `n - 1` through `n` samples and serves
//! it as a bounded function: inside the sampled x range the polynomial is
//! evaluated, outside it the nearest bound's y is returned.
//!
//! ```
//! use curvefit::{CurveFit, SamplePoint};
//!
//! let fit = CurveFit::from_point_list("[(1,1),(2,4),(3,9)]");
//! assert!(fit.is_valid());
//! assert!((fit.evaluate(2.5) - 6.25).abs() < 1e-9);
//! assert_eq!(fit.evaluate(0.0), 1.0);
//!
//! let restored: CurveFit = fit.to_string().parse().unwrap();
//! assert_eq!(restored, fit);
//!
//! let bad = CurveFit::from_points(&[SamplePoint::new(1.0, 5.0), SamplePoint::new(1.0, 7.0)]);
//! assert!(!bad.is_valid());
//! assert_eq!(bad.evaluate(1.0), 0.0);
//! ```
//!
//! Modules:
//!
//! - `domain`: sample points and options
//! - `math`: interpolation system build and Gaussian elimination
//! - `fit`: the `CurveFit` value
//! - `io`: point list parsing and the canonical string
//! - `error`: failure kinds

pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;

pub use domain::{CoefficientFormat, FitOptions, SamplePoint};
pub use error::{FitError, ParseCurveFitError};
pub use fit::CurveFit;
