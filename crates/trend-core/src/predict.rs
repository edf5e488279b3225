// File: crates/trend-core/src/predict.rs
// Summary: Fitted curve evaluated in the original (de-linearized) space.

use crate::error::DomainError;
use crate::regression::RegressionResult;
use crate::solver::Coefficients;
use crate::trendline::RegressionModel;

/// Pure `f64 → f64` closure over fitted coefficients.
///
/// Holds no mutable state; cloning is cheap and evaluation is safe from any
/// number of threads.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionFunction {
    model: RegressionModel,
    coefficients: Coefficients,
}

impl PredictionFunction {
    pub fn new(model: RegressionModel, coefficients: Coefficients) -> Self {
        Self { model, coefficients }
    }

    pub fn from_result(result: &RegressionResult) -> Self {
        Self::new(result.model(), result.coefficients().clone())
    }

    pub fn model(&self) -> RegressionModel { self.model }

    pub fn coefficients(&self) -> &Coefficients { &self.coefficients }

    /// Evaluate the curve; outside the model's domain the IEEE result
    /// (NaN or ±∞) is returned as is.
    pub fn evaluate(&self, x: f64) -> f64 {
        let b = &self.coefficients;
        match self.model {
            RegressionModel::Polynomial { .. } => {
                // Horner over b1 + b2·x + b3·x² + …
                b.as_slice().iter().rev().fold(0.0, |acc, &c| acc * x + c)
            }
            RegressionModel::Exponential => b.b(1).exp() * (b.b(2) * x).exp(),
            RegressionModel::Logarithmic => b.b(2) * x.ln() + b.b(1),
            RegressionModel::Power => b.b(1).exp() * x.powf(b.b(2)),
        }
    }

    /// Evaluate the curve, reporting points outside the model's domain.
    pub fn try_evaluate(&self, x: f64) -> Result<f64, DomainError> {
        match self.model {
            RegressionModel::Logarithmic if x <= 0.0 => Err(DomainError::new(x, "logarithm of a non-positive value")),
            RegressionModel::Power if x < 0.0 => Err(DomainError::new(x, "real power of a negative base")),
            _ => Ok(self.evaluate(x)),
        }
    }
}
