// File: crates/trend-core/src/engine.rs
// Summary: Fit-and-describe entry point handed to the chart layer (fit_trend_line).

use tracing::debug;

use crate::equation::format_equation;
use crate::error::{EngineError, Result};
use crate::predict::PredictionFunction;
use crate::regression::{fit_regression, RegressionResult};
use crate::sampler::{sample_function_with, CancelToken, SamplerOptions};
use crate::series::Series;
use crate::smoothing::moving_average;
use crate::text::format_decimal;
use crate::trendline::{RegressionModel, TrendLineSpec, TrendModel};

/// Renderable geometry of a trend line.
#[derive(Clone, Debug, PartialEq)]
pub enum TrendCurve {
    /// Final points: moving averages, and the two endpoints of straight lines.
    Points(Vec<(f64, f64)>),
    /// Curve still to be sampled over `[start, end]`.
    Function { function: PredictionFunction, start: f64, end: f64 },
}

impl TrendCurve {
    /// Polyline runs ready for drawing; sampled curves may come back split
    /// at discontinuities.
    pub fn render(&self, opts: SamplerOptions, cancel: Option<&CancelToken>) -> Vec<Vec<(f64, f64)>> {
        match self {
            TrendCurve::Points(points) if points.is_empty() => Vec::new(),
            TrendCurve::Points(points) => vec![points.clone()],
            TrendCurve::Function { function, start, end } => {
                let samples = sample_function_with(function, *start, *end, opts);
                match cancel {
                    Some(token) => samples.with_cancel(token.clone()).runs(),
                    None => samples.runs(),
                }
            }
        }
    }
}

/// A fitted (or smoothed) trend line with its display text.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendLine {
    pub model: TrendModel,
    pub title: Option<String>,
    pub curve: TrendCurve,
    /// `None` for moving averages.
    pub regression: Option<RegressionResult>,
    pub equation: Option<String>,
    pub r2: Option<f64>,
    pub sigma2: Option<f64>,
    show_equation: bool,
    show_r2: bool,
    show_sigma2: bool,
}

impl TrendLine {
    /// Legend/label text: equation, `r²` and `σ²` lines as enabled.
    pub fn label(&self) -> Option<String> {
        let mut lines = Vec::new();
        if self.show_equation {
            lines.extend(self.equation.clone());
        }
        if self.show_r2 {
            lines.extend(self.r2.map(|v| format!("r² = {}", format_decimal(v, 4))));
        }
        if self.show_sigma2 {
            lines.extend(self.sigma2.map(|v| format!("σ² = {}", format_decimal(v, 4))));
        }
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    /// The continuous curve, when the trend line has one.
    pub fn function(&self) -> Option<PredictionFunction> {
        self.regression.as_ref().map(PredictionFunction::from_result)
    }
}

/// Fit one trend line to `series`.
///
/// Returns `Ok(None)` when a moving average does not apply to the series
/// (`n < 3` or `window > n - 1`); such trend lines are skipped silently.
pub fn fit_trend_line(series: &Series, spec: &TrendLineSpec) -> Result<Option<TrendLine>> {
    let model = spec.model();
    let (curve, regression) = match model.regression() {
        None => {
            let TrendModel::MovingAverage { window } = model else {
                return Err(EngineError::Validation(format!("{model} has no regression form")));
            };
            match moving_average(series, window) {
                Some(points) => (TrendCurve::Points(points), None),
                None => {
                    debug!(window, samples = series.len(), "moving average not applicable");
                    return Ok(None);
                }
            }
        }
        Some(regression_model) => {
            let result = fit_regression(series, regression_model, spec.fixed_intercept())?;
            let function = PredictionFunction::from_result(&result);
            let (start, end) = plot_range(series, spec.range());
            let curve = match regression_model {
                RegressionModel::Polynomial { degree } if degree <= 1 => {
                    TrendCurve::Points(vec![(start, function.evaluate(start)), (end, function.evaluate(end))])
                }
                _ => TrendCurve::Function { function, start, end },
            };
            (curve, Some(result))
        }
    };

    let (r2, sigma2) = match &regression {
        Some(result) => {
            let r2 = match result.r2() {
                Ok(v) => Some(v),
                Err(e) if spec.show_r2() || spec.show_sigma2() => return Err(e),
                Err(_) => None,
            };
            (r2, Some(result.sigma2()))
        }
        None => (None, None),
    };
    let equation = regression.as_ref().map(|r| format_equation(r.model(), r.coefficients()));

    Ok(Some(TrendLine {
        model,
        title: spec.title().map(str::to_string),
        curve,
        regression,
        equation,
        r2,
        sigma2,
        show_equation: spec.show_equation(),
        show_r2: spec.show_r2(),
        show_sigma2: spec.show_sigma2(),
    }))
}

/// Data x-range, widened (never narrowed) by the requested range.
fn plot_range(series: &Series, requested: Option<(f64, f64)>) -> (f64, f64) {
    let (lo, hi) = series.x_bounds();
    match requested {
        Some((start, end)) => (lo.min(start), hi.max(end)),
        None => (lo, hi),
    }
}
