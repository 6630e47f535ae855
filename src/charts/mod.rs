//! Chart renderers.
//!
//! Each renderer is a pure function of its inputs and returns a
//! [`RenderedChart`]: the series, labels and titles of one figure, with no
//! I/O. Drawing to a file is a separate step, see [`crate::viz::export_chart`].
//!
//! - [`render_line`]: one line per country over the years
//! - [`render_grouped_bar`]: per-country clusters of (year, series) bars
//! - [`render_stacked`]: two series stacked per year for one country

pub mod grouped_bar;
pub mod line;
pub mod stacked;

pub use grouped_bar::render_grouped_bar;
pub use line::render_line;
pub use stacked::{StackSegment, render_stacked, stack_segments};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    GroupedBar,
    StackedBar,
}

/// One line: `(year, value)` points in drawing order. `None` values are gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<(i32, Option<f64>)>,
}

/// One bar per category, aligned with the chart's `categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartBody {
    Lines(Vec<LineSeries>),
    /// `series[i].values[j]` is the bar of series `i` in category `j`.
    GroupedBars {
        categories: Vec<String>,
        series: Vec<BarSeries>,
    },
    /// Layers are stacked bottom-up in order.
    StackedBars {
        categories: Vec<String>,
        layers: Vec<BarSeries>,
    },
}

/// A figure ready to be exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

impl RenderedChart {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_y_label(mut self, y_label: impl Into<String>) -> Self {
        self.y_label = y_label.into();
        self
    }

    /// Rename legend entries in order; extra labels are ignored and missing
    /// ones keep their current text.
    pub fn with_legend_labels<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        let names: Vec<&mut String> = match &mut self.body {
            ChartBody::Lines(lines) => lines.iter_mut().map(|l| &mut l.label).collect(),
            ChartBody::GroupedBars { series, .. } => {
                series.iter_mut().map(|s| &mut s.label).collect()
            }
            ChartBody::StackedBars { layers, .. } => {
                layers.iter_mut().map(|s| &mut s.label).collect()
            }
        };
        for (name, new) in names.into_iter().zip(labels) {
            *name = new.as_ref().to_string();
        }
        self
    }

    /// Legend entries in drawing order.
    pub fn legend_labels(&self) -> Vec<&str> {
        match &self.body {
            ChartBody::Lines(lines) => lines.iter().map(|l| l.label.as_str()).collect(),
            ChartBody::GroupedBars { series, .. } => {
                series.iter().map(|s| s.label.as_str()).collect()
            }
            ChartBody::StackedBars { layers, .. } => {
                layers.iter().map(|s| s.label.as_str()).collect()
            }
        }
    }

    /// Smallest and largest y extent the figure needs, including the zero
    /// baseline for bars. `None` when there is no value at all.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut seen = false;
        let mut take = |v: f64| {
            lo = lo.min(v);
            hi = hi.max(v);
            seen = true;
        };
        match &self.body {
            ChartBody::Lines(lines) => {
                for v in lines.iter().flat_map(|l| l.points.iter().filter_map(|p| p.1)) {
                    take(v);
                }
            }
            ChartBody::GroupedBars { series, .. } => {
                for v in series.iter().flat_map(|s| s.values.iter().flatten()) {
                    take(0.0);
                    take(*v);
                }
            }
            ChartBody::StackedBars { categories, layers } => {
                for i in 0..categories.len() {
                    for seg in stack_segments(layers, i) {
                        take(seg.bottom);
                        take(seg.top);
                    }
                }
            }
        }
        seen.then_some((lo, hi))
    }
}
