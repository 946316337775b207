//! The curve-fit value.
//!
//! A [`CurveFit`] is the polynomial of degree `n - 1` passing exactly through
//! `n` samples, evaluated only inside the sampled x range. Outside that range
//! it returns the y of the nearest bound instead of extrapolating.
//!
//! Construction never fails loudly. Any problem with the input produces an
//! invalid fit, which:
//!
//! - reports `is_valid() == false` and `size() == 0`
//! - evaluates to `0.0` everywhere
//! - renders as `invalid`
//!
//! The reason is kept and can be read with [`CurveFit::failure`].
//!
//! Fits are immutable. Equality, hashing and serde all go through the
//! canonical string (see [`crate::io::curve`]).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tracing::warn;

use crate::domain::{CoefficientFormat, FitOptions, SamplePoint};
use crate::error::{FitError, ParseCurveFitError};
use crate::io::curve::{format_canonical, parse_canonical};
use crate::io::points::parse_points;
use crate::math::interpolating_coefficients;

/// Interpolating polynomial clamped to its sampled x range. `Clone` is a deep copy.
#[derive(Debug, Clone)]
pub struct CurveFit {
    state: FitState,
}

#[derive(Debug, Clone)]
enum FitState {
    Valid(Interpolant),
    Invalid(FitError),
}

#[derive(Debug, Clone)]
struct Interpolant {
    min: SamplePoint,
    max: SamplePoint,
    /// Highest degree first.
    coefficients: Vec<f64>,
}

impl CurveFit {
    /// Fit the given samples with default options.
    pub fn from_points(points: &[SamplePoint]) -> Self {
        Self::from_points_with(points, &FitOptions::default())
    }

    pub fn from_points_with(points: &[SamplePoint], opts: &FitOptions) -> Self {
        let Some((min, max)) = domain_bounds(points).filter(|_| points.len() >= 2) else {
            warn!(count = points.len(), "curve fit needs at least 2 samples");
            return Self::invalid(FitError::InsufficientSamples {
                count: points.len(),
            });
        };

        match interpolating_coefficients(points, opts.pivot_tolerance) {
            Ok(coefficients) => Self::from_parts(min, max, coefficients),
            Err(err) => Self::invalid(err),
        }
    }

    /// Fit raw rows of `[x, y, ...]`; values past the second are ignored.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        Self::from_rows_with(rows, &FitOptions::default())
    }

    pub fn from_rows_with<R: AsRef<[f64]>>(rows: &[R], opts: &FitOptions) -> Self {
        if rows.len() < 2 {
            warn!(count = rows.len(), "curve fit needs at least 2 rows");
            return Self::invalid(FitError::InsufficientSamples { count: rows.len() });
        }

        let mut points = Vec::with_capacity(rows.len());
        for (row, values) in rows.iter().enumerate() {
            match values.as_ref() {
                [x, y, ..] => points.push(SamplePoint::new(*x, *y)),
                short => {
                    warn!(row, len = short.len(), "curve fit row is missing x or y");
                    return Self::invalid(FitError::MalformedRow {
                        row,
                        len: short.len(),
                    });
                }
            }
        }
        Self::from_points_with(&points, opts)
    }

    /// Fit a point list such as `[(1,1),(2,4),(3,9)]`.
    ///
    /// Unparseable text yields an empty list and therefore an invalid fit.
    pub fn from_point_list(text: &str) -> Self {
        Self::from_point_list_with(text, &FitOptions::default())
    }

    pub fn from_point_list_with(text: &str, opts: &FitOptions) -> Self {
        Self::from_points_with(&parse_points(text), opts)
    }

    /// Read a fit back from its canonical string.
    pub fn from_canonical(text: &str) -> Result<Self, ParseCurveFitError> {
        parse_canonical(text)
    }

    pub(crate) fn from_parts(min: SamplePoint, max: SamplePoint, coefficients: Vec<f64>) -> Self {
        debug_assert!(!coefficients.is_empty());
        Self {
            state: FitState::Valid(Interpolant {
                min,
                max,
                coefficients,
            }),
        }
    }

    pub(crate) fn invalid(reason: FitError) -> Self {
        Self {
            state: FitState::Invalid(reason),
        }
    }

    pub(crate) fn parts(&self) -> Option<(SamplePoint, SamplePoint, &[f64])> {
        match &self.state {
            FitState::Valid(curve) => Some((curve.min, curve.max, &curve.coefficients)),
            FitState::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, FitState::Valid(_))
    }

    /// Number of coefficients (`0` when invalid).
    pub fn size(&self) -> usize {
        self.parts().map_or(0, |(_, _, c)| c.len())
    }

    /// Coefficient at `index`, highest degree first; `0.0` when out of range.
    pub fn coefficient(&self, index: usize) -> f64 {
        self.parts()
            .and_then(|(_, _, c)| c.get(index).copied())
            .unwrap_or(0.0)
    }

    /// A copy of the coefficients, highest degree first.
    pub fn coefficients(&self) -> Vec<f64> {
        self.parts().map(|(_, _, c)| c.to_vec()).unwrap_or_default()
    }

    /// The sample with the smallest x (first one on ties).
    pub fn min_point(&self) -> Option<SamplePoint> {
        self.parts().map(|(min, _, _)| min)
    }

    /// The sample with the largest x (first one on ties).
    pub fn max_point(&self) -> Option<SamplePoint> {
        self.parts().map(|(_, max, _)| max)
    }

    /// Why this fit is invalid, if it is.
    pub fn failure(&self) -> Option<&FitError> {
        match &self.state {
            FitState::Valid(_) => None,
            FitState::Invalid(reason) => Some(reason),
        }
    }

    /// Evaluate the fit at `x`.
    ///
    /// Clamps to the bound samples outside `[min.x, max.x]` and returns `0.0`
    /// for an invalid fit.
    pub fn evaluate(&self, x: f64) -> f64 {
        let FitState::Valid(curve) = &self.state else {
            return 0.0;
        };
        if x <= curve.min.x() {
            return curve.min.y();
        }
        if x >= curve.max.x() {
            return curve.max.y();
        }
        curve
            .coefficients
            .iter()
            .fold(0.0, |acc, &c| acc.mul_add(x, c))
    }

    /// Canonical string with the given coefficient format.
    pub fn to_string_with(&self, format: CoefficientFormat) -> String {
        format_canonical(self, format)
    }
}

/// First-occurrence min and max samples by x.
fn domain_bounds(points: &[SamplePoint]) -> Option<(SamplePoint, SamplePoint)> {
    let (first, rest) = points.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for p in rest {
        if p.x() < min.x() {
            min = *p;
        }
        if p.x() > max.x() {
            max = *p;
        }
    }
    Some((min, max))
}

impl fmt::Display for CurveFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_canonical(self, CoefficientFormat::Shortest))
    }
}

impl FromStr for CurveFit {
    type Err = ParseCurveFitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_canonical(s)
    }
}

impl From<&[SamplePoint]> for CurveFit {
    fn from(points: &[SamplePoint]) -> Self {
        Self::from_points(points)
    }
}

impl PartialEq for CurveFit {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for CurveFit {}

impl Hash for CurveFit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<SamplePoint> {
        raw.iter().copied().map(SamplePoint::from).collect()
    }

    /// `n` samples with strictly increasing x, shuffled so input order is not sorted.
    fn random_samples(rng: &mut StdRng, n: usize) -> Vec<SamplePoint> {
        let mut points: Vec<SamplePoint> = (0..n)
            .map(|i| {
                let x = i as f64 + rng.gen_range(0.0..0.5) - n as f64 / 2.0;
                SamplePoint::new(x, rng.gen_range(-10.0..10.0))
            })
            .collect();
        for i in (1..n).rev() {
            points.swap(i, rng.gen_range(0..=i));
        }
        points
    }

    #[test]
    fn parabola_scenario() {
        let fit = CurveFit::from_points(&pts(&[(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]));
        assert!(fit.is_valid());
        assert_eq!(fit.size(), 3);
        assert_abs_diff_eq!(fit.coefficient(0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.coefficient(1), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.coefficient(2), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.evaluate(2.5), 6.25, epsilon = 1e-12);
        assert_eq!(fit.evaluate(0.0), 1.0);
        assert_eq!(fit.evaluate(10.0), 9.0);
    }

    #[test]
    fn line_scenario() {
        let fit = CurveFit::from_points(&pts(&[(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(fit.coefficients(), vec![1.0, 0.0]);
        assert_eq!(fit.evaluate(0.5), 0.5);
    }

    #[test]
    fn duplicate_x_scenario() {
        let fit = CurveFit::from_points(&pts(&[(1.0, 5.0), (1.0, 7.0)]));
        assert!(!fit.is_valid());
        assert_eq!(fit.size(), 0);
        assert_eq!(fit.failure(), Some(&FitError::SingularSystem { column: 1 }));
        assert_eq!(fit.evaluate(1.0), 0.0);
        assert_eq!(fit.to_string(), "invalid");
    }

    #[test]
    fn too_few_samples_are_invalid() {
        for points in [vec![], pts(&[(1.0, 2.0)])] {
            let fit = CurveFit::from_points(&points);
            assert!(!fit.is_valid());
            assert_eq!(fit.size(), 0);
            assert_eq!(
                fit.failure(),
                Some(&FitError::InsufficientSamples {
                    count: points.len()
                })
            );
            assert_eq!(fit.min_point(), None);
            assert_eq!(fit.evaluate(3.0), 0.0);
        }
    }

    #[test]
    fn rows_match_points() {
        let rows = [vec![1.0, 1.0], vec![2.0, 4.0, 99.0], vec![3.0, 9.0]];
        let from_rows = CurveFit::from_rows(&rows);
        let from_points = CurveFit::from_points(&pts(&[(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]));
        assert!(from_rows.is_valid());
        assert_eq!(from_rows, from_points);

        let arrays = [[0.0, 0.0], [1.0, 1.0]];
        assert_eq!(CurveFit::from_rows(&arrays).coefficients(), vec![1.0, 0.0]);
    }

    #[test]
    fn short_row_invalidates_everything() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0], vec![2.0, 4.0]];
        let fit = CurveFit::from_rows(&rows);
        assert!(!fit.is_valid());
        assert_eq!(fit.failure(), Some(&FitError::MalformedRow { row: 1, len: 1 }));

        let fit = CurveFit::from_rows(&[vec![1.0, 2.0]]);
        assert_eq!(fit.failure(), Some(&FitError::InsufficientSamples { count: 1 }));
    }

    #[test]
    fn point_list_constructor_parses_text() {
        let fit = CurveFit::from_point_list("[(1,1),(2,4),(3,9)]");
        assert!(fit.is_valid());
        assert_abs_diff_eq!(fit.evaluate(2.5), 6.25, epsilon = 1e-12);

        let bad = CurveFit::from_point_list("[(1,1),(2,4)");
        assert_eq!(bad.failure(), Some(&FitError::InsufficientSamples { count: 0 }));
    }

    #[test]
    fn bounds_use_first_occurrence_on_ties() {
        let fit = CurveFit::from_points(&pts(&[(2.0, 8.0), (-1.0, 1.0), (0.5, 3.0)]));
        assert_eq!(fit.min_point(), Some(SamplePoint::new(-1.0, 1.0)));
        assert_eq!(fit.max_point(), Some(SamplePoint::new(2.0, 8.0)));

        // Duplicate x would make the system singular, so check the scan directly.
        let tied = pts(&[(0.0, 1.0), (1.0, 2.0), (0.0, 3.0), (1.0, 4.0)]);
        assert_eq!(
            domain_bounds(&tied),
            Some((SamplePoint::new(0.0, 1.0), SamplePoint::new(1.0, 2.0)))
        );
    }

    #[test]
    fn coefficient_out_of_range_is_zero() {
        let fit = CurveFit::from_points(&pts(&[(0.0, 0.0), (1.0, 1.0)]));
        assert_eq!(fit.coefficient(2), 0.0);
        assert_eq!(fit.coefficient(usize::MAX), 0.0);
    }

    #[test]
    fn clone_is_equal_and_independent() {
        let fit = CurveFit::from_points(&pts(&[(1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]));
        let copy = fit.clone();
        assert_eq!(copy, fit);

        let mut exposed = copy.coefficients();
        exposed[0] = 42.0;
        assert_eq!(copy.coefficients(), fit.coefficients());
        assert_ne!(copy.coefficient(0), 42.0);
    }

    #[test]
    fn pivot_tolerance_is_opt_in() {
        let points = pts(&[(1.0, 5.0), (1.0 + 1e-13, 7.0)]);
        assert!(CurveFit::from_points(&points).is_valid());

        let strict = FitOptions::with_pivot_tolerance(1e-9);
        let fit = CurveFit::from_points_with(&points, &strict);
        assert!(matches!(fit.failure(), Some(FitError::SingularSystem { .. })));
    }

    #[test]
    fn equality_and_hash_follow_canonical_string() {
        let a = CurveFit::from_points(&pts(&[(0.0, 0.0), (1.0, 1.0)]));
        let b = CurveFit::from_point_list("(1,1),(0,0)");
        let c = CurveFit::from_points(&pts(&[(0.0, 0.0), (1.0, 2.0)]));
        assert_eq!(a, b);
        assert_ne!(a, c);

        let invalid_one = CurveFit::from_points(&[]);
        let invalid_two = CurveFit::from_points(&pts(&[(1.0, 5.0), (1.0, 7.0)]));
        assert_eq!(invalid_one, invalid_two);

        let set: HashSet<CurveFit> = [a, b, c, invalid_one, invalid_two].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn interpolates_every_sample_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..=7 {
            for _ in 0..20 {
                let points = random_samples(&mut rng, n);
                let fit = CurveFit::from_points(&points);
                assert!(fit.is_valid(), "n={n} {points:?}");
                assert_eq!(fit.size(), n);
                for p in &points {
                    assert_relative_eq!(
                        fit.evaluate(p.x()),
                        p.y(),
                        epsilon = 1e-9,
                        max_relative = 1e-9
                    );
                }
            }
        }
    }

    #[test]
    fn clamps_outside_sampled_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 2..=6 {
            let points = random_samples(&mut rng, n);
            let fit = CurveFit::from_points(&points);
            let min = fit.min_point().unwrap();
            let max = fit.max_point().unwrap();
            assert!(min.x() <= max.x());
            for step in 0..5 {
                let d = step as f64 * 3.7;
                assert_eq!(fit.evaluate(min.x() - d), min.y());
                assert_eq!(fit.evaluate(max.x() + d), max.y());
            }
        }
    }
}
