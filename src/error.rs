//! Failure kinds.
//!
//! Fitting never fails loudly: every [`FitError`] ends up stored inside an
//! invalid [`CurveFit`](crate::fit::CurveFit) so callers that only check
//! `is_valid()` keep working, while callers that care can ask for the reason.
//! Reading a persisted fit back is the one caller-visible fallible operation
//! and reports [`ParseCurveFitError`].

/// Why a curve fit could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// Fewer than two samples were supplied.
    #[error("at least 2 samples are required, got {count}")]
    InsufficientSamples { count: usize },

    /// A raw numeric row had fewer than two values.
    #[error("row {row} has {len} value(s); an x and a y are required")]
    MalformedRow { row: usize, len: usize },

    /// Elimination hit a pivot that is zero (or within the configured tolerance).
    ///
    /// Almost always caused by two samples sharing the same x.
    #[error("zero pivot in column {column}; sample x values must be distinct")]
    SingularSystem { column: usize },

    /// Back-substitution produced an infinite or NaN coefficient.
    #[error("solved coefficients are not finite")]
    NonFiniteCoefficients,

    /// The fit was read back from the `invalid` marker; the original reason is lost.
    #[error("restored from an invalid-fit marker")]
    InvalidMarker,
}

/// Errors reading the canonical `min=... max=... coeff=...` representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCurveFitError {
    #[error("missing `{0}=` section")]
    MissingSection(&'static str),

    #[error("`{section}` is not a point: {text:?}")]
    InvalidPoint { section: &'static str, text: String },

    #[error("coefficient {index} is not a number: {text:?}")]
    InvalidCoefficient { index: usize, text: String },

    /// A fit always has at least two coefficients.
    #[error("expected at least 2 coefficients, got {count}")]
    TooFewCoefficients { count: usize },

    /// A bound or coefficient is infinite or NaN.
    #[error("`{section}` contains a non-finite value")]
    NonFiniteValue { section: &'static str },

    /// Bounds of a fit have strictly increasing x.
    #[error("min x must be less than max x")]
    InvertedBounds,

    #[error("unexpected trailing input: {0:?}")]
    TrailingInput(String),
}
