// File: crates/trend-core/src/lib.rs
// Summary: Core library entry point; exports the regression engine, sampler and chart model.

pub mod error;
pub mod series;
pub mod trendline;
pub mod solver;
pub mod transform;
pub mod stats;
pub mod regression;
pub mod predict;
pub mod sampler;
pub mod smoothing;
pub mod text;
pub mod equation;
pub mod engine;
pub mod pool;
pub mod axis;
pub mod chart;
pub mod view;

pub use error::{Coordinate, DomainError, EngineError, Result};
pub use series::Series;
pub use trendline::{RegressionModel, TrendLineSpec, TrendLineSpecBuilder, TrendModel};
pub use solver::{solve_least_squares, Coefficients};
pub use transform::{linearize, LinearProblem};
pub use stats::FitStatistics;
pub use regression::{fit_regression, RegressionResult};
pub use predict::PredictionFunction;
pub use sampler::{sample_function, sample_function_with, CancelToken, Fallible, Function, SamplerOptions, Samples};
pub use smoothing::moving_average;
pub use equation::format_equation;
pub use engine::{fit_trend_line, TrendCurve, TrendLine};
pub use pool::{Pending, PoolConfig, TrendPool};
pub use axis::Axis;
pub use chart::{Chart, DisplayEntry, DisplayList, EntryKind, Plot, PlotFailure, Style};
pub use view::ViewState;
