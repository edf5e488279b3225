// File: crates/trend-core/src/error.rs
// Summary: Engine error taxonomy and the per-sample domain error used by the sampler.

use std::fmt;

/// Which coordinate of a sample broke a model's positivity requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coordinate {
    X,
    Y,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::X => f.write_str("x"),
            Coordinate::Y => f.write_str("y"),
        }
    }
}

/// Errors produced by a single fit request.
///
/// Every error is local to the series/trend line it was raised for; callers
/// plotting several trend lines keep going after a failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed input: mismatched x/y lengths, invalid window, fixed
    /// intercept on a model without an intercept term, etc.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A sample violates the positivity requirement of a linearized model.
    #[error("{model} model requires {coordinate} > 0, but sample {index} has {coordinate} = {value}")]
    ModelDomain {
        model: &'static str,
        index: usize,
        coordinate: Coordinate,
        value: f64,
    },

    /// Not more samples than parameters to estimate.
    #[error("insufficient data: {samples} samples cannot determine {parameters} parameters")]
    InsufficientData { samples: usize, parameters: usize },

    /// The normal equations have no unique solution.
    #[error("normal equations are singular (pivot {pivot:e} in column {column}, matrix scale {scale:e})")]
    SingularSystem { column: usize, pivot: f64, scale: f64 },

    /// R² is undefined: the target has no variance but the fit is not exact.
    #[error("coefficient of determination is undefined: target has zero variance but SS_res = {ss_res:e}")]
    DegenerateVariance { ss_res: f64 },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl EngineError {
    /// True when the caller should drop this trend line and keep plotting the
    /// base series rather than treat the request as malformed.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            EngineError::ModelDomain { .. }
                | EngineError::InsufficientData { .. }
                | EngineError::SingularSystem { .. }
                | EngineError::DegenerateVariance { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// A function could not be evaluated at `x` (pole, log of a non-positive
/// number, ...). The sampler turns these into gaps, never into failures.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("{reason} at x = {x}")]
pub struct DomainError {
    pub x: f64,
    pub reason: &'static str,
}

impl DomainError {
    pub const fn new(x: f64, reason: &'static str) -> Self {
        Self { x, reason }
    }
}
