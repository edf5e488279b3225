// File: crates/trend-core/src/stats.rs
// Summary: Goodness-of-fit statistics (R², residual variance) in the space the fit was solved in.

use crate::error::{EngineError, Result};

/// Fit quality of a regression, measured on the linearized target.
///
/// For exponential, logarithmic and power models these describe ln-space
/// residuals, not residuals of the original y values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitStatistics {
    /// `None` when the target has no variance but the fit is not exact.
    pub r2: Option<f64>,
    pub sigma2: f64,
    pub ss_res: f64,
    pub ss_tot: f64,
    pub degrees_of_freedom: usize,
}

impl FitStatistics {
    /// `observed` and `fitted` are aligned; `parameters` is subtracted from
    /// the sample count for the degrees of freedom (1 for any fit with a
    /// pinned intercept).
    pub fn compute(observed: &[f64], fitted: &[f64], parameters: usize) -> Self {
        let n = observed.len();
        let mean = observed.iter().sum::<f64>() / n as f64;
        let ss_res: f64 = observed.iter().zip(fitted).map(|(y, f)| (y - f).powi(2)).sum();
        let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();

        // rounding noise on constant targets must not count as variance
        let tiny = 1e-12 * (1.0 + observed.iter().map(|y| y * y).sum::<f64>());
        let r2 = if ss_tot > tiny {
            Some(1.0 - ss_res / ss_tot)
        } else if ss_res <= tiny {
            Some(1.0)
        } else {
            None
        };

        let degrees_of_freedom = n.saturating_sub(parameters);
        let sigma2 = if degrees_of_freedom > 0 { ss_res / degrees_of_freedom as f64 } else { f64::NAN };

        Self { r2, sigma2, ss_res, ss_tot, degrees_of_freedom }
    }

    /// R², or `DegenerateVariance` when it is undefined.
    pub fn r2(&self) -> Result<f64> {
        self.r2.ok_or(EngineError::DegenerateVariance { ss_res: self.ss_res })
    }
}
