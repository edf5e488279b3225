// File: crates/trend-core/src/chart.rs
// Summary: Chart model accumulating function and point plots, turned into renderer-ready
// display data through the worker pool.

use std::sync::Arc;

use tracing::warn;

use crate::axis::Axis;
use crate::engine::fit_trend_line;
use crate::error::{EngineError, Result};
use crate::pool::{Pending, TrendPool};
use crate::sampler::{sample_function_with, CancelToken, Function};
use crate::series::Series;
use crate::trendline::{TrendLineSpec, TrendModel};
use crate::view::ViewState;

/// How a point series is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// Connecting line only.
    Line,
    /// Markers only.
    Marker,
    #[default]
    LineAndMarker,
}

pub type SharedFunction = Arc<dyn Function + Send + Sync>;

#[derive(Clone)]
pub struct FunctionPlot {
    pub function: SharedFunction,
    pub start: f64,
    pub end: f64,
    pub title: String,
}

#[derive(Clone, Debug)]
pub struct PointPlot {
    pub series: Series,
    pub title: String,
    pub style: Style,
    pub trend_lines: Vec<TrendLineSpec>,
}

#[derive(Clone)]
pub enum Plot {
    Function(FunctionPlot),
    Points(PointPlot),
}

pub struct Chart {
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    plots: Vec<Plot>,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self { title: None, x_axis: Axis::default_x(), y_axis: Axis::default_y(), plots: Vec::new() }
    }

    pub fn plots(&self) -> &[Plot] { &self.plots }

    /// Plot `function` over `[start, end]`.
    pub fn plot_function<F>(&mut self, function: F, start: f64, end: f64, title: impl Into<String>) -> &mut Self
    where
        F: Function + Send + Sync + 'static,
    {
        self.plots.push(Plot::Function(FunctionPlot {
            function: Arc::new(function),
            start,
            end,
            title: title.into(),
        }));
        self
    }

    /// Plot a point series with any number of trend lines.
    pub fn plot_points(
        &mut self,
        series: Series,
        title: impl Into<String>,
        style: Style,
        trend_lines: Vec<TrendLineSpec>,
    ) -> &mut Self {
        self.plots.push(Plot::Points(PointPlot { series, title: title.into(), style, trend_lines }));
        self
    }

    /// Plot parallel x/y columns; mismatched lengths are rejected.
    pub fn plot_xy(
        &mut self,
        x: Vec<f64>,
        y: Vec<f64>,
        title: impl Into<String>,
        style: Style,
        trend_lines: Vec<TrendLineSpec>,
    ) -> Result<&mut Self> {
        let series = Series::try_new(x, y)?;
        Ok(self.plot_points(series, title, style, trend_lines))
    }

    /// Compute display data for every plot on `pool`.
    pub fn render(&self, pool: &TrendPool) -> DisplayList {
        self.render_inner(pool, None)
    }

    /// Like [`Chart::render`]; sampling stops early once `cancel` fires.
    pub fn render_cancellable(&self, pool: &TrendPool, cancel: &CancelToken) -> DisplayList {
        self.render_inner(pool, Some(cancel))
    }

    /// Fit the axes to the data in `list`.
    pub fn autoscale(&mut self, list: &DisplayList) {
        ViewState::from_display_list(list).apply_to_chart(self);
    }

    fn render_inner(&self, pool: &TrendPool, cancel: Option<&CancelToken>) -> DisplayList {
        let opts = pool.sampler();
        let mut queued: Vec<Queued> = Vec::new();

        for plot in &self.plots {
            match plot {
                Plot::Function(fp) => {
                    let fp = fp.clone();
                    let cancel = cancel.cloned();
                    queued.push(Queued::Function(pool.submit(move || {
                        let samples = sample_function_with(&*fp.function, fp.start, fp.end, opts);
                        let runs = match cancel {
                            Some(token) => samples.with_cancel(token).runs(),
                            None => samples.runs(),
                        };
                        DisplayEntry { title: fp.title, kind: EntryKind::Function, runs, label: None }
                    })));
                }
                Plot::Points(pp) => {
                    queued.push(Queued::Ready(DisplayEntry {
                        title: pp.title.clone(),
                        kind: EntryKind::Points(pp.style),
                        runs: vec![pp.series.points().collect()],
                        label: None,
                    }));
                    for spec in &pp.trend_lines {
                        let title = spec
                            .title()
                            .map(str::to_string)
                            .unwrap_or_else(|| format!("Trend line ({})", pp.title));
                        let (series, spec, cancel) = (pp.series.clone(), spec.clone(), cancel.cloned());
                        let entry_title = title.clone();
                        let pending = pool.submit(move || -> Result<Option<DisplayEntry>> {
                            let Some(line) = fit_trend_line(&series, &spec)? else { return Ok(None) };
                            let runs = line.curve.render(opts, cancel.as_ref());
                            Ok(Some(DisplayEntry {
                                title: entry_title,
                                kind: EntryKind::TrendLine(line.model),
                                runs,
                                label: line.label(),
                            }))
                        });
                        queued.push(Queued::Trend { title, pending });
                    }
                }
            }
        }

        // single writer: only this thread touches the display list
        let mut list = DisplayList::default();
        for job in queued {
            match job {
                Queued::Ready(entry) => list.entries.push(entry),
                Queued::Function(pending) => match pending.wait() {
                    Some(entry) => list.entries.push(entry),
                    None => warn!("function plot job did not complete"),
                },
                Queued::Trend { title, pending } => match pending.wait() {
                    Some(Ok(Some(entry))) => list.entries.push(entry),
                    Some(Ok(None)) => {}
                    Some(Err(error)) => {
                        warn!(title = %title, error = %error, "trend line skipped");
                        list.failures.push(PlotFailure { title, error });
                    }
                    None => warn!(title = %title, "trend line job did not complete"),
                },
            }
        }
        list
    }
}

enum Queued {
    Ready(DisplayEntry),
    Function(Pending<DisplayEntry>),
    Trend { title: String, pending: Pending<Result<Option<DisplayEntry>>> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntryKind {
    Function,
    Points(Style),
    TrendLine(TrendModel),
}

/// One renderer-ready item: polyline runs plus optional label text.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayEntry {
    pub title: String,
    pub kind: EntryKind,
    pub runs: Vec<Vec<(f64, f64)>>,
    pub label: Option<String>,
}

/// A trend line that could not be produced.
#[derive(Debug)]
pub struct PlotFailure {
    pub title: String,
    pub error: EngineError,
}

/// Everything the renderer needs, in plot order.
#[derive(Debug, Default)]
pub struct DisplayList {
    pub entries: Vec<DisplayEntry>,
    pub failures: Vec<PlotFailure>,
}

impl DisplayList {
    pub fn entry(&self, title: &str) -> Option<&DisplayEntry> {
        self.entries.iter().find(|e| e.title == title)
    }
}
