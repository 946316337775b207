//! Read/write the canonical curve-fit string.
//!
//! The canonical string is the portable representation of a fit:
//!
//! ```text
//! min=(x,y) max=(x,y) coeff=c0,c1,...,cn-1
//! ```
//!
//! or the literal `invalid`. It is what `Display`, equality, hashing and serde
//! all use. With [`CoefficientFormat::Shortest`] every number is written in its
//! shortest round-trip form, so reading the string back reproduces the fit
//! bit for bit.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::domain::{CoefficientFormat, SamplePoint};
use crate::error::{FitError, ParseCurveFitError};
use crate::fit::CurveFit;
use crate::io::points::parse_point;

/// Canonical string of an invalid fit.
pub const INVALID_MARKER: &str = "invalid";

/// Render `fit` in canonical form.
pub fn format_canonical(fit: &CurveFit, format: CoefficientFormat) -> String {
    let Some((min, max, coefficients)) = fit.parts() else {
        return INVALID_MARKER.to_string();
    };
    let coeff: Vec<String> = coefficients.iter().map(|&c| format.render(c)).collect();
    format!("min={min} max={max} coeff={}", coeff.join(","))
}

/// Parse a canonical string.
pub fn parse_canonical(text: &str) -> Result<CurveFit, ParseCurveFitError> {
    let text = text.trim();
    if text == INVALID_MARKER {
        return Ok(CurveFit::invalid(FitError::InvalidMarker));
    }

    let rest = text
        .strip_prefix("min=")
        .ok_or(ParseCurveFitError::MissingSection("min"))?;
    let (min_text, rest) = rest
        .split_once("max=")
        .ok_or(ParseCurveFitError::MissingSection("max"))?;
    let (max_text, coeff_text) = rest
        .split_once("coeff=")
        .ok_or(ParseCurveFitError::MissingSection("coeff"))?;

    let min = section_point("min", min_text)?;
    let max = section_point("max", max_text)?;
    if min.x() >= max.x() {
        return Err(ParseCurveFitError::InvertedBounds);
    }

    let coefficients = parse_coefficients(coeff_text)?;
    if coefficients.len() < 2 {
        return Err(ParseCurveFitError::TooFewCoefficients {
            count: coefficients.len(),
        });
    }
    if !coefficients.iter().all(|c| c.is_finite()) {
        return Err(ParseCurveFitError::NonFiniteValue { section: "coeff" });
    }

    Ok(CurveFit::from_parts(min, max, coefficients))
}

fn section_point(
    section: &'static str,
    text: &str,
) -> Result<SamplePoint, ParseCurveFitError> {
    let point = parse_point(text).ok_or_else(|| ParseCurveFitError::InvalidPoint {
        section,
        text: text.trim().to_string(),
    })?;
    if !(point.x().is_finite() && point.y().is_finite()) {
        return Err(ParseCurveFitError::NonFiniteValue { section });
    }
    Ok(point)
}

/// Comma-separated numbers; text after the last number is trailing input.
fn parse_coefficients(text: &str) -> Result<Vec<f64>, ParseCurveFitError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(index, &part)| {
            let invalid = || ParseCurveFitError::InvalidCoefficient {
                index,
                text: part.to_string(),
            };
            match part.split_once(char::is_whitespace) {
                Some((number, rest)) if index == last => {
                    number.parse::<f64>().map_err(|_| invalid())?;
                    Err(ParseCurveFitError::TrailingInput(rest.trim().to_string()))
                }
                _ => part.parse::<f64>().map_err(|_| invalid()),
            }
        })
        .collect()
}

impl Serialize for CurveFit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurveFit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_canonical(&text).map_err(de::Error::custom)
    }
}
