// File: crates/trend-core/src/series.rs
// Summary: Immutable (x, y) sample series fed to the trend-line engine.
// Notes:
// - Samples are stored as two parallel columns; the constructor is the only
//   place the equal-length invariant is established.

use crate::error::{EngineError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    /// Build a series from parallel columns.
    /// Requires `x.len() == y.len()`, at least one sample and finite values.
    pub fn try_new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(EngineError::Validation(format!(
                "x and y must have the same length (x: {}, y: {})",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(EngineError::Validation("series has no samples".into()));
        }
        if let Some(i) = x.iter().zip(&y).position(|(a, b)| !a.is_finite() || !b.is_finite()) {
            return Err(EngineError::Validation(format!(
                "sample {i} is not finite ({}, {})",
                x[i], y[i]
            )));
        }
        Ok(Self { x, y })
    }

    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let (x, y) = points.iter().copied().unzip();
        Self::try_new(x, y)
    }

    pub fn x(&self) -> &[f64] { &self.x }

    pub fn y(&self) -> &[f64] { &self.y }

    pub fn len(&self) -> usize { self.x.len() }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Smallest and largest x value.
    pub fn x_bounds(&self) -> (f64, f64) {
        self.x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}
