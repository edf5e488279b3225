// File: crates/trend-core/src/regression.rs
// Summary: Fit pipeline for one regression model: linearize → solve → statistics.

use tracing::debug;

use crate::error::Result;
use crate::series::Series;
use crate::solver::{solve_least_squares, Coefficients};
use crate::stats::FitStatistics;
use crate::transform::linearize;
use crate::trendline::RegressionModel;

/// Outcome of one regression. Computed once per request and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct RegressionResult {
    model: RegressionModel,
    coefficients: Coefficients,
    intercept_fixed: bool,
    statistics: FitStatistics,
}

impl RegressionResult {
    pub fn model(&self) -> RegressionModel { self.model }

    /// `b(1)` is the constant term (exactly the fixed intercept when one was
    /// given), `b(i)` the coefficient of the i-th basis column.
    pub fn coefficients(&self) -> &Coefficients { &self.coefficients }

    pub fn intercept_fixed(&self) -> bool { self.intercept_fixed }

    pub fn statistics(&self) -> &FitStatistics { &self.statistics }

    /// Coefficient of determination; fails with `DegenerateVariance` when undefined.
    pub fn r2(&self) -> Result<f64> { self.statistics.r2() }

    pub fn sigma2(&self) -> f64 { self.statistics.sigma2 }

    pub fn degrees_of_freedom(&self) -> usize { self.statistics.degrees_of_freedom }
}

/// Fit `model` to `series`, optionally pinning the linear-space intercept.
pub fn fit_regression(series: &Series, model: RegressionModel, fixed_intercept: Option<f64>) -> Result<RegressionResult> {
    let problem = linearize(series, model, fixed_intercept)?;
    let estimated = solve_least_squares(&problem.design, &problem.target)?;

    let fitted_part = &problem.design * nalgebra::DVector::from_column_slice(estimated.as_slice());
    let fitted: Vec<f64> = fitted_part.iter().map(|v| v + fixed_intercept.unwrap_or(0.0)).collect();
    // a pinned intercept counts as one parameter whatever the degree
    let parameters = if fixed_intercept.is_some() { 1 } else { problem.parameters() };
    let statistics = FitStatistics::compute(problem.observed.as_slice(), &fitted, parameters);

    let coefficients = match fixed_intercept {
        Some(b0) => Coefficients::new(std::iter::once(b0).chain(estimated.as_slice().iter().copied()).collect()),
        None => estimated,
    };

    debug!(
        model = %model,
        coefficients = ?coefficients.as_slice(),
        r2 = ?statistics.r2,
        sigma2 = statistics.sigma2,
        "regression fitted"
    );

    Ok(RegressionResult { model, coefficients, intercept_fixed: fixed_intercept.is_some(), statistics })
}
