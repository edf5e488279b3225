// File: crates/trend-core/src/axis.rs
// Summary: Axis model with label, visible range and tick-label formatting.

use crate::text::format_tick;

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self { Self::new("X", 0.0, 1.0) }

    pub fn default_y() -> Self { Self::new("Y", 0.0, 1.0) }

    /// Tick label for `value` (scientific notation above 1000 in magnitude).
    pub fn tick_label(&self, value: f64) -> String {
        format_tick(value)
    }
}
