// File: crates/trend-core/src/transform.rs
// Summary: Linearization of each regression family into an ordinary least-squares problem.
//
// | model       | requirement   | target | columns besides constant |
// |-------------|---------------|--------|--------------------------|
// | polynomial  | none          | y      | x, x², …, x^d            |
// | exponential | y > 0         | ln y   | x                        |
// | logarithmic | x > 0         | y      | ln x                     |
// | power       | x > 0, y > 0  | ln y   | ln x                     |

use nalgebra::{DMatrix, DVector};

use crate::error::{Coordinate, EngineError, Result};
use crate::series::Series;
use crate::trendline::RegressionModel;

/// A linearized fitting problem ready for [`crate::solver::solve_least_squares`].
#[derive(Clone, Debug)]
pub struct LinearProblem {
    pub model: RegressionModel,
    /// Basis evaluations, one row per sample. Holds the constant column
    /// first unless the intercept is fixed.
    pub design: DMatrix<f64>,
    /// Linearized target with any fixed intercept already subtracted.
    pub target: DVector<f64>,
    /// Linearized target as observed (no intercept subtracted).
    pub observed: DVector<f64>,
    pub fixed_intercept: Option<f64>,
}

impl LinearProblem {
    /// Number of estimated parameters (design columns).
    pub fn parameters(&self) -> usize { self.design.ncols() }
}

/// Check the model's domain and build the design matrix and target vector.
pub fn linearize(series: &Series, model: RegressionModel, fixed_intercept: Option<f64>) -> Result<LinearProblem> {
    if fixed_intercept.is_some() && !model.supports_fixed_intercept() {
        return Err(EngineError::Validation(format!(
            "a fixed intercept cannot be set on a {} trend line",
            model.name()
        )));
    }
    check_domain(series, model)?;

    let basis = basis_columns(model);
    let constant = usize::from(fixed_intercept.is_none());
    let n = series.len();
    // size check before the n×p matrix is allocated
    let columns = match basis.checked_add(constant) {
        Some(p) if n > p => p,
        p => {
            return Err(EngineError::InsufficientData { samples: n, parameters: p.unwrap_or(usize::MAX) });
        }
    };
    let design = DMatrix::from_fn(n, columns, |row, col| {
        if col < constant {
            1.0
        } else {
            basis_value(model, series.x()[row], col - constant + 1)
        }
    });
    let observed = DVector::from_iterator(n, series.y().iter().map(|&y| linearize_target(model, y)));
    let target = match fixed_intercept {
        Some(b0) => observed.map(|v| v - b0),
        None => observed.clone(),
    };

    Ok(LinearProblem { model, design, target, observed, fixed_intercept })
}

/// Number of non-constant design columns for a model.
fn basis_columns(model: RegressionModel) -> usize {
    match model {
        RegressionModel::Polynomial { degree } => degree,
        RegressionModel::Exponential | RegressionModel::Logarithmic | RegressionModel::Power => 1,
    }
}

/// Value of basis column `k` (1-based, constant excluded) at `x`.
fn basis_value(model: RegressionModel, x: f64, k: usize) -> f64 {
    match model {
        RegressionModel::Polynomial { .. } => x.powi(k as i32),
        RegressionModel::Exponential => x,
        RegressionModel::Logarithmic | RegressionModel::Power => x.ln(),
    }
}

fn linearize_target(model: RegressionModel, y: f64) -> f64 {
    match model {
        RegressionModel::Polynomial { .. } | RegressionModel::Logarithmic => y,
        RegressionModel::Exponential | RegressionModel::Power => y.ln(),
    }
}

fn check_domain(series: &Series, model: RegressionModel) -> Result<()> {
    let (need_x, need_y) = match model {
        RegressionModel::Polynomial { .. } => return Ok(()),
        RegressionModel::Exponential => (false, true),
        RegressionModel::Logarithmic => (true, false),
        RegressionModel::Power => (true, true),
    };
    for (index, (x, y)) in series.points().enumerate() {
        let violation = if need_x && x <= 0.0 {
            Some((Coordinate::X, x))
        } else if need_y && y <= 0.0 {
            Some((Coordinate::Y, y))
        } else {
            None
        };
        if let Some((coordinate, value)) = violation {
            return Err(EngineError::ModelDomain { model: model.name(), index, coordinate, value });
        }
    }
    Ok(())
}
