//! Interpolation system build and solve.
//!
//! For `n` samples we build the square descending-power Vandermonde system
//!
//! ```text
//! | x_0^(n-1)  x_0^(n-2)  ...  1 |   | c_0     |   | y_0     |
//! |    ...                        | * |  ...    | = |  ...    |
//! | x_n-1^(n-1)          ...  1   |   | c_n-1   |   | y_n-1   |
//! ```
//!
//! and solve it with Gaussian elimination and partial pivoting followed by
//! back-substitution. The coefficients come out highest degree first.
//!
//! Implementation choices:
//! - The system is always square, so there is no least-squares fallback.
//! - A pivot is rejected when `|p| <= tolerance`. With the default tolerance of
//!   `0.0` that is an exactly-zero pivot and nothing else.
//! - Failure is reported as an `Err`, never as partially solved coefficients.

use nalgebra::storage::StorageMut;
use nalgebra::{DMatrix, DVector, Dim, Matrix, Scalar};
use tracing::{trace, warn};

use crate::domain::SamplePoint;
use crate::error::FitError;

/// Build the Vandermonde matrix and right-hand side for `points`.
pub fn vandermonde_system(points: &[SamplePoint]) -> (DMatrix<f64>, DVector<f64>) {
    let n = points.len();
    let matrix = DMatrix::from_fn(n, n, |row, col| power(points[row].x(), n - col - 1));
    let rhs = DVector::from_iterator(n, points.iter().map(SamplePoint::y));
    (matrix, rhs)
}

fn power(x: f64, exponent: usize) -> f64 {
    match i32::try_from(exponent) {
        Ok(e) => x.powi(e),
        Err(_) => x.powf(exponent as f64),
    }
}

/// Swap rows `a` and `b` of two row-aligned containers in lockstep.
///
/// Used during pivot selection so the matrix and its right-hand side never
/// drift apart.
pub fn swap_rows<T, R1, C1, S1, R2, C2, S2>(
    matrix: &mut Matrix<T, R1, C1, S1>,
    rhs: &mut Matrix<T, R2, C2, S2>,
    a: usize,
    b: usize,
) where
    T: Scalar,
    R1: Dim,
    C1: Dim,
    S1: StorageMut<T, R1, C1>,
    R2: Dim,
    C2: Dim,
    S2: StorageMut<T, R2, C2>,
{
    debug_assert_eq!(matrix.nrows(), rhs.nrows());
    if a != b {
        matrix.swap_rows(a, b);
        rhs.swap_rows(a, b);
    }
}

/// Solve the square system `matrix * c = rhs`.
///
/// Consumes both inputs; they are reduced in place.
pub fn solve_square(
    mut matrix: DMatrix<f64>,
    mut rhs: DVector<f64>,
    tolerance: f64,
) -> Result<Vec<f64>, FitError> {
    let n = matrix.nrows();
    if n < 2 || matrix.ncols() != n || rhs.len() != n {
        return Err(FitError::InsufficientSamples { count: n.min(rhs.len()) });
    }

    trace!(%matrix, %rhs, "solving interpolation system");

    // Forward elimination with partial pivoting.
    for pr in 0..n {
        let mut mx = pr;
        for i in (pr + 1)..n {
            if matrix[(i, pr)].abs() > matrix[(mx, pr)].abs() {
                mx = i;
            }
        }
        swap_rows(&mut matrix, &mut rhs, pr, mx);

        let pivot = matrix[(pr, pr)];
        if pivot.abs() <= tolerance {
            warn!(column = pr, pivot, tolerance, "singular interpolation system");
            return Err(FitError::SingularSystem { column: pr });
        }

        for i in (pr + 1)..n {
            let c = matrix[(i, pr)] / pivot;
            for j in pr..n {
                let delta = c * matrix[(pr, j)];
                matrix[(i, j)] -= delta;
            }
            let delta = c * rhs[pr];
            rhs[i] -= delta;
        }
    }

    // Back-substitution; `matrix` is now upper triangular.
    let mut coefficients = vec![0.0; n];
    for i in (0..n).rev() {
        let mut s = 0.0;
        for j in (i + 1)..n {
            s += matrix[(i, j)] * coefficients[j];
        }
        coefficients[i] = (rhs[i] - s) / matrix[(i, i)];
    }

    if !coefficients.iter().all(|c| c.is_finite()) {
        warn!(n, "interpolation produced non-finite coefficients");
        return Err(FitError::NonFiniteCoefficients);
    }

    Ok(coefficients)
}

/// Convenience: build and solve the interpolation system for `points`.
pub fn interpolating_coefficients(
    points: &[SamplePoint],
    tolerance: f64,
) -> Result<Vec<f64>, FitError> {
    let (matrix, rhs) = vandermonde_system(points);
    solve_square(matrix, rhs, tolerance)
}
