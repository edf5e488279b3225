// File: crates/trend-core/src/trendline.rs
// Summary: Trend-line model families and the per-line request (TrendLineSpec + builder).

use std::fmt;

use crate::error::{EngineError, Result};

/// Model families that are fitted by least squares after linearization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegressionModel {
    /// `y = b1 + b2·x + … + b(d+1)·x^d`
    Polynomial { degree: usize },
    /// `y = a·e^(b·x)`
    Exponential,
    /// `y = b1 + a·ln(x)`
    Logarithmic,
    /// `y = a·x^b`
    Power,
}

impl RegressionModel {
    pub fn name(&self) -> &'static str {
        match self {
            RegressionModel::Polynomial { .. } => "polynomial",
            RegressionModel::Exponential => "exponential",
            RegressionModel::Logarithmic => "logarithmic",
            RegressionModel::Power => "power",
        }
    }

    /// Whether the model has a constant term that can be pinned.
    pub fn supports_fixed_intercept(&self) -> bool {
        match self {
            RegressionModel::Polynomial { .. } | RegressionModel::Exponential | RegressionModel::Power => true,
            RegressionModel::Logarithmic => false,
        }
    }
}

impl fmt::Display for RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionModel::Polynomial { degree } => write!(f, "polynomial (degree {degree})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Every kind of trend line a point plot can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrendModel {
    Polynomial { degree: usize },
    Exponential,
    Logarithmic,
    Power,
    /// Trailing mean over `window` samples; no regression involved.
    MovingAverage { window: usize },
}

impl TrendModel {
    /// The regression family behind this trend line, `None` for moving averages.
    pub fn regression(&self) -> Option<RegressionModel> {
        match *self {
            TrendModel::Polynomial { degree } => Some(RegressionModel::Polynomial { degree }),
            TrendModel::Exponential => Some(RegressionModel::Exponential),
            TrendModel::Logarithmic => Some(RegressionModel::Logarithmic),
            TrendModel::Power => Some(RegressionModel::Power),
            TrendModel::MovingAverage { .. } => None,
        }
    }
}

impl fmt::Display for TrendModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendModel::MovingAverage { window } => write!(f, "moving average (window {window})"),
            TrendModel::Polynomial { degree } => write!(f, "polynomial (degree {degree})"),
            TrendModel::Exponential => f.write_str("exponential"),
            TrendModel::Logarithmic => f.write_str("logarithmic"),
            TrendModel::Power => f.write_str("power"),
        }
    }
}

/// One trend line requested for a point series.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendLineSpec {
    model: TrendModel,
    fixed_intercept: Option<f64>,
    range: Option<(f64, f64)>,
    show_equation: bool,
    show_r2: bool,
    show_sigma2: bool,
    title: Option<String>,
}

impl TrendLineSpec {
    pub fn builder(model: TrendModel) -> TrendLineSpecBuilder {
        TrendLineSpecBuilder::new(model)
    }

    /// Degree-1 polynomial with default display options.
    pub fn linear() -> Self { Self::preset(TrendModel::Polynomial { degree: 1 }) }

    pub fn quadratic() -> Self { Self::preset(TrendModel::Polynomial { degree: 2 }) }

    pub fn exponential() -> Self { Self::preset(TrendModel::Exponential) }

    pub fn logarithmic() -> Self { Self::preset(TrendModel::Logarithmic) }

    pub fn power() -> Self { Self::preset(TrendModel::Power) }

    fn preset(model: TrendModel) -> Self {
        Self {
            model,
            fixed_intercept: None,
            range: None,
            show_equation: true,
            show_r2: false,
            show_sigma2: false,
            title: None,
        }
    }

    pub fn model(&self) -> TrendModel { self.model }

    /// Pinned value of the linear-space constant term (`b1`), if any.
    pub fn fixed_intercept(&self) -> Option<f64> { self.fixed_intercept }

    /// Requested plotting range; it only ever widens the data range.
    pub fn range(&self) -> Option<(f64, f64)> { self.range }

    pub fn show_equation(&self) -> bool { self.show_equation }

    pub fn show_r2(&self) -> bool { self.show_r2 }

    pub fn show_sigma2(&self) -> bool { self.show_sigma2 }

    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
}

/// Builder for [`TrendLineSpec`]; all checks run in [`TrendLineSpecBuilder::build`].
#[derive(Clone, Debug)]
pub struct TrendLineSpecBuilder {
    spec: TrendLineSpec,
}

impl TrendLineSpecBuilder {
    fn new(model: TrendModel) -> Self {
        Self { spec: TrendLineSpec::preset(model) }
    }

    pub fn fixed_intercept(mut self, b0: f64) -> Self {
        self.spec.fixed_intercept = Some(b0);
        self
    }

    pub fn range(mut self, start: f64, end: f64) -> Self {
        self.spec.range = Some((start, end));
        self
    }

    pub fn show_equation(mut self, show: bool) -> Self {
        self.spec.show_equation = show;
        self
    }

    pub fn show_r2(mut self, show: bool) -> Self {
        self.spec.show_r2 = show;
        self
    }

    pub fn show_sigma2(mut self, show: bool) -> Self {
        self.spec.show_sigma2 = show;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.spec.title = Some(title.into());
        self
    }

    pub fn build(self) -> Result<TrendLineSpec> {
        let spec = self.spec;
        if let TrendModel::MovingAverage { window: 0 } = spec.model {
            return Err(EngineError::Validation("moving average window must be at least 1".into()));
        }
        if let Some(b0) = spec.fixed_intercept {
            match spec.model.regression() {
                Some(model) if model.supports_fixed_intercept() => {}
                Some(model) => {
                    return Err(EngineError::Validation(format!(
                        "a fixed intercept cannot be set on a {} trend line",
                        model.name()
                    )))
                }
                None => {
                    return Err(EngineError::Validation(
                        "a fixed intercept cannot be set on a moving average".into(),
                    ))
                }
            }
            if !b0.is_finite() {
                return Err(EngineError::Validation(format!("fixed intercept must be finite, got {b0}")));
            }
        }
        if let Some((start, end)) = spec.range {
            if !start.is_finite() || !end.is_finite() || start > end {
                return Err(EngineError::Validation(format!(
                    "range must be finite with start <= end, got [{start}, {end}]"
                )));
            }
        }
        Ok(spec)
    }
}
