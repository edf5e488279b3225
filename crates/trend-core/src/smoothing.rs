// File: crates/trend-core/src/smoothing.rs
// Summary: Trailing moving average over a series (the non-regression trend line).

use crate::series::Series;

/// Trailing mean over `window` samples.
///
/// Point `i` is the mean of `y[i..i + window]`, placed at the x of the last
/// sample in the window, so `n - window + 1` points come out. Returns `None`
/// (the trend line is skipped) unless `1 <= window <= n - 1` and `n >= 3`.
pub fn moving_average(series: &Series, window: usize) -> Option<Vec<(f64, f64)>> {
    let n = series.len();
    if window == 0 || n < 3 || window > n - 1 {
        return None;
    }
    let (x, y) = (series.x(), series.y());
    let mut out = Vec::with_capacity(n - window + 1);
    let mut sum = 0.0f64;
    for i in 0..n {
        sum += y[i];
        if i + 1 >= window {
            if i + 1 > window { sum -= y[i - window]; }
            out.push((x[i], sum / window as f64));
        }
    }
    Some(out)
}
