// File: crates/trend-core/src/view.rs
// Summary: Data extents of a rendered display list, written back to a chart's axes.

use crate::chart::{Chart, DisplayList};

/// Fraction of the y span added above and below the data.
const Y_MARGIN: f64 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    pub const UNIT: Self = Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };

    /// Extents of every drawn point in `list`; [`ViewState::UNIT`] when empty.
    pub fn from_display_list(list: &DisplayList) -> Self {
        Self::from_points(list.entries.iter().flat_map(|e| e.runs.iter().flatten().copied()))
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let bounds = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .fold(None, |acc: Option<[f64; 4]>, (x, y)| {
                Some(match acc {
                    None => [x, x, y, y],
                    Some([x0, x1, y0, y1]) => [x0.min(x), x1.max(x), y0.min(y), y1.max(y)],
                })
            });
        let Some([x_lo, x_hi, y_lo, y_hi]) = bounds else { return Self::UNIT };

        let (x_min, x_max) = non_flat(x_lo, x_hi);
        let (y_min, y_max) = non_flat(y_lo, y_hi);
        let pad = (y_max - y_min) * Y_MARGIN;
        Self { x_min, x_max, y_min: y_min - pad, y_max: y_max + pad }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        (chart.x_axis.min, chart.x_axis.max) = (self.x_min, self.x_max);
        (chart.y_axis.min, chart.y_axis.max) = (self.y_min, self.y_max);
    }
}

/// A single value still gets a unit-wide range.
fn non_flat(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo < 1e-9 { (lo, lo + 1.0) } else { (lo, hi) }
}
