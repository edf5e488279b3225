// File: crates/trend-core/tests/chart.rs
// Purpose: Worker pool jobs and chart rendering into an ordered display list.

use trend_core::{
    Axis, CancelToken, Chart, DisplayList, EngineError, EntryKind, PoolConfig, Series, Style, TrendLineSpec,
    TrendModel, TrendPool, ViewState,
};

fn pool() -> TrendPool {
    TrendPool::new(PoolConfig { threads: 2, ..PoolConfig::default() }).unwrap()
}

fn chart_with_trend_lines() -> Chart {
    let series = Series::try_new(vec![-1.0, 0.0, 1.0, 2.0], vec![1.0, 3.0, 5.0, 7.0]).unwrap();
    let log = TrendLineSpec::builder(TrendModel::Logarithmic).title("log fit").build().unwrap();
    let wide_ma = TrendLineSpec::builder(TrendModel::MovingAverage { window: 10 }).build().unwrap();

    let mut chart = Chart::new();
    chart
        .plot_function(|x: f64| x * x, 0.0, 1.0, "square")
        .plot_points(series, "data", Style::Marker, vec![TrendLineSpec::linear(), log, wide_ma]);
    chart
}

#[test]
fn pool_runs_jobs() {
    let pool = pool();
    assert_eq!(pool.threads(), 2);
    assert_eq!(pool.submit(|| 21 * 2).wait(), Some(42));

    let series = Series::try_new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]).unwrap();
    let line = pool.fit(series, TrendLineSpec::linear()).wait().unwrap().unwrap().unwrap();
    assert_eq!(line.equation.as_deref(), Some("y = 2x"));
}

#[test]
fn panicking_job_leaves_the_pool_usable() {
    let pool = pool();
    let crashed = pool.submit(|| -> u32 { panic!("job failed") });
    let sibling = pool.submit(|| 7u32);
    assert_eq!(crashed.wait(), None);
    assert_eq!(sibling.wait(), Some(7));
    assert_eq!(pool.submit(|| 1u32 + 1).wait(), Some(2));
}

#[test]
fn render_keeps_plot_order_and_collects_failures() {
    let chart = chart_with_trend_lines();
    let list = chart.render(&pool());

    let titles: Vec<_> = list.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["square", "data", "Trend line (data)"]);
    assert_eq!(list.entries[1].kind, EntryKind::Points(Style::Marker));
    assert_eq!(list.entries[2].kind, EntryKind::TrendLine(TrendModel::Polynomial { degree: 1 }));
    assert_eq!(list.entries[2].label.as_deref(), Some("y = 2x + 3"));
    assert_eq!(list.entry("square").map(|e| e.runs.len()), Some(1));

    assert_eq!(list.failures.len(), 1);
    assert_eq!(list.failures[0].title, "log fit");
    assert!(matches!(list.failures[0].error, EngineError::ModelDomain { index: 0, .. }));
}

#[test]
fn cancelled_render_leaves_sampled_plots_empty() {
    let chart = chart_with_trend_lines();
    let token = CancelToken::new();
    token.cancel();
    let list = chart.render_cancellable(&pool(), &token);
    assert!(list.entry("square").is_some_and(|e| e.runs.is_empty()));
    assert_eq!(list.entry("data").map(|e| e.runs.len()), Some(1));
}

#[test]
fn autoscale_covers_every_entry() {
    let mut chart = chart_with_trend_lines();
    let list = chart.render(&pool());
    chart.autoscale(&list);
    assert_eq!(chart.x_axis.min, -1.0);
    assert_eq!(chart.x_axis.max, 2.0);
    assert!(chart.y_axis.min < 0.0);
    assert!(chart.y_axis.max > 7.0);
}

#[test]
fn empty_view_falls_back_to_unit_square() {
    let view = ViewState::from_display_list(&DisplayList::default());
    assert_eq!(view, ViewState::UNIT);

    // a single point still gets a unit-wide range
    let view = ViewState::from_points([(2.0, 5.0)]);
    assert_eq!((view.x_min, view.x_max), (2.0, 3.0));
    assert!(view.y_min < 5.0 && view.y_max > 6.0);
}

#[test]
fn plot_xy_rejects_mismatched_columns() {
    let mut chart = Chart::new();
    assert!(chart.plot_xy(vec![1.0, 2.0], vec![1.0], "bad", Style::default(), Vec::new()).is_err());
    assert!(chart.plots().is_empty());
    assert_eq!(Style::default(), Style::LineAndMarker);
}

#[test]
fn tick_labels_switch_to_scientific() {
    let axis = Axis::new("y", 0.0, 1.0);
    assert_eq!(axis.tick_label(12345.0), "1.23E4");
    assert_eq!(axis.tick_label(0.5), "0.5");
}
