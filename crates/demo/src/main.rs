// File: crates/demo/src/main.rs
// Summary: Demo loads an x/y CSV (or synthesizes data), fits the requested trend lines on the
// worker pool and writes every display entry to target/out as CSV.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trend_core::{Axis, Chart, DisplayList, PoolConfig, Series, Style, TrendLineSpec, TrendModel, TrendPool};

const USAGE: &str = "usage: trend-demo [file.csv] [linear|quadratic|cubic|poly<N>|exp|log|power|ma<N>]...";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trend_core=info,trend_demo=info".into()),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    // First argument is a file unless it already names a model
    let has_file = args.first().is_some_and(|a| parse_model(a).is_none());
    let input = if has_file { Some(PathBuf::from(args.remove(0))) } else { None };

    let (series, title) = match &input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("file not found: {}", path.display());
            }
            info!(path = %path.display(), "using input file");
            let series = load_xy_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or("data").to_string();
            (series, title)
        }
        None => (synthetic_series()?, "synthetic".to_string()),
    };
    info!(points = series.len(), "series loaded");

    let models = if args.is_empty() {
        vec![
            TrendModel::Polynomial { degree: 1 },
            TrendModel::Polynomial { degree: 2 },
            TrendModel::Exponential,
            TrendModel::MovingAverage { window: 5 },
        ]
    } else {
        args.iter()
            .map(|a| parse_model(a).with_context(|| format!("unknown model '{a}'\n{USAGE}")))
            .collect::<Result<Vec<_>>>()?
    };

    let specs = models
        .into_iter()
        .map(|model| {
            let regression = model.regression().is_some();
            TrendLineSpec::builder(model).show_r2(regression).show_sigma2(regression).build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let pool = TrendPool::new(PoolConfig::default())?;
    info!(threads = pool.threads(), "worker pool ready");

    let mut chart = Chart::new();
    chart.title = Some(title.clone());
    chart.x_axis = Axis::new("x", 0.0, 1.0);
    chart.y_axis = Axis::new("y", 0.0, 1.0);
    chart.plot_points(series, title, Style::LineAndMarker, specs);

    let list = chart.render(&pool);
    chart.autoscale(&list);
    println!(
        "View: x [{}, {}]  y [{}, {}]",
        chart.x_axis.tick_label(chart.x_axis.min),
        chart.x_axis.tick_label(chart.x_axis.max),
        chart.y_axis.tick_label(chart.y_axis.min),
        chart.y_axis.tick_label(chart.y_axis.max),
    );

    for failure in &list.failures {
        println!("Skipped {}: {}", failure.title, failure.error);
    }
    write_display_list(&list)?;
    Ok(())
}

/// Parse a model argument such as `poly3` or `ma5`.
fn parse_model(arg: &str) -> Option<TrendModel> {
    let arg = arg.trim().to_lowercase();
    let model = match arg.as_str() {
        "linear" => TrendModel::Polynomial { degree: 1 },
        "quadratic" => TrendModel::Polynomial { degree: 2 },
        "cubic" => TrendModel::Polynomial { degree: 3 },
        "exp" | "exponential" => TrendModel::Exponential,
        "log" | "logarithmic" => TrendModel::Logarithmic,
        "power" => TrendModel::Power,
        other => {
            if let Some(n) = other.strip_prefix("poly") {
                TrendModel::Polynomial { degree: n.parse().ok()? }
            } else if let Some(n) = other.strip_prefix("ma") {
                TrendModel::MovingAverage { window: n.parse().ok()? }
            } else {
                return None;
            }
        }
    };
    Some(model)
}

/// Load an x/y CSV file.
fn load_xy_csv(path: &Path) -> Result<Series> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_xy(rdr)
}

/// Columns are found by header name; without a known x column the row index
/// is used, without a known y column the last column. Date x values become
/// days since the first dated row so polynomial fits stay well conditioned.
fn read_xy<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Series> {
    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_x = idx(&["x", "time", "timestamp", "date", "datetime", "t"]);
    let i_y = idx(&["y", "value", "close", "price", "v"]).or_else(|| headers.len().checked_sub(1));
    let Some(i_y) = i_y else { anyhow::bail!("no columns in CSV header") };
    if i_x.is_none() {
        warn!("no x column found; using row index");
    }

    let mut origin: Option<f64> = None;
    let (mut xs, mut ys) = (Vec::new(), Vec::new());
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let x = match i_x {
            Some(ix) => rec.get(ix).and_then(parse_x).map(|x| match x {
                XValue::Number(v) => v,
                XValue::Days(d) => d - *origin.get_or_insert(d),
            }),
            None => Some(row as f64),
        };
        let y = rec.get(i_y).and_then(|s| s.parse::<f64>().ok());
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                xs.push(x);
                ys.push(y);
            }
            _ => warn!(row, "skipping unparseable row"),
        }
    }
    if let Some(days) = origin {
        info!(origin_epoch_days = days, "date x values shifted to days since first row");
    }
    if xs.is_empty() {
        anyhow::bail!("no data rows loaded; check headers/delimiter");
    }
    Ok(Series::try_new(xs, ys)?)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum XValue {
    Number(f64),
    /// Days since the Unix epoch.
    Days(f64),
}

/// Numeric x, or an RFC 3339 / `YYYY-MM-DD` date.
fn parse_x(s: &str) -> Option<XValue> {
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        return Some(XValue::Number(v));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(XValue::Days(dt.timestamp() as f64 / 86_400.0));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    Some(XValue::Days(date.signed_duration_since(epoch).num_days() as f64))
}

/// Noisy exponential growth on 1..=40.
fn synthetic_series() -> Result<Series> {
    let points = (1..=40)
        .map(|i| {
            let x = i as f64 * 0.25;
            let noise = 1.0 + 0.05 * (i as f64 * 7.3).sin();
            (x, 2.0 * (0.3 * x).exp() * noise)
        })
        .collect::<Vec<_>>();
    Ok(Series::from_points(&points)?)
}

/// Write each entry as target/out/trend_<n>.csv with run, x, y columns.
fn write_display_list(list: &DisplayList) -> Result<()> {
    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    for (n, entry) in list.entries.iter().enumerate() {
        let out = out_dir.join(format!("trend_{n}.csv"));
        let mut wtr = csv::Writer::from_path(&out).with_context(|| format!("creating {}", out.display()))?;
        wtr.write_record(["run", "x", "y"])?;
        for (run, points) in entry.runs.iter().enumerate() {
            for &(x, y) in points {
                wtr.write_record([run.to_string(), x.to_string(), y.to_string()])?;
            }
        }
        wtr.flush()?;

        println!("{} ({} runs) -> {}", entry.title, entry.runs.len(), out.display());
        if let Some(label) = &entry.label {
            for line in label.lines() {
                println!("    {line}");
            }
        }
    }
    Ok(())
}
