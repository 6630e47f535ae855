use super::{BarSeries, ChartBody, ChartKind, RenderedChart};
use crate::error::{ParseError, Result};
use crate::models::{Table, parse_value, year_prefix};
use crate::select::single_row;
use serde::{Deserialize, Serialize};

/// Vertical extent of one layer inside a stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    /// Index into the chart's layers.
    pub layer: usize,
    pub bottom: f64,
    pub top: f64,
}

/// Composition of two series for one country, one stacked bar per year.
///
/// `series_a` is the base segment and `series_b` sits on top of it. Each
/// (country, series) pair must match exactly one row of `table`.
pub fn render_stacked<S: AsRef<str>>(
    table: &Table,
    country: &str,
    series_a: &str,
    series_b: &str,
    years: &[S],
) -> Result<RenderedChart> {
    let (ia, row_a) = single_row(table, country, series_a)?;
    let (ib, row_b) = single_row(table, country, series_b)?;

    let mut categories = Vec::with_capacity(years.len());
    let mut a = Vec::with_capacity(years.len());
    let mut b = Vec::with_capacity(years.len());
    for label in years {
        let label = label.as_ref();
        let col = table.require_column(label)?;
        categories.push(year_prefix(label)?.to_string());
        a.push(numeric(row_a, ia, label, col)?);
        b.push(numeric(row_b, ib, label, col)?);
    }

    Ok(RenderedChart {
        kind: ChartKind::StackedBar,
        title: format!("{country}: {series_a} and {series_b}"),
        x_label: "Year".to_string(),
        y_label: "Emissions".to_string(),
        body: ChartBody::StackedBars {
            categories,
            layers: vec![
                BarSeries {
                    label: series_a.to_string(),
                    values: a,
                },
                BarSeries {
                    label: series_b.to_string(),
                    values: b,
                },
            ],
        },
    })
}

fn numeric(row: &[String], index: usize, column: &str, col: usize) -> Result<Option<f64>> {
    parse_value(&row[col]).map_err(|_| {
        ParseError::Number {
            column: column.to_string(),
            row: index,
            cell: row[col].clone(),
        }
        .into()
    })
}

/// Segments of the stacked bar at `index`, bottom-up.
///
/// Each layer starts where the previous one ended; a missing value adds no
/// segment and no height.
pub fn stack_segments(layers: &[BarSeries], index: usize) -> Vec<StackSegment> {
    let mut base = 0.0;
    let mut out = Vec::with_capacity(layers.len());
    for (layer, series) in layers.iter().enumerate() {
        if let Some(v) = series.values.get(index).copied().flatten() {
            out.push(StackSegment {
                layer,
                bottom: base,
                top: base + v,
            });
            base += v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(values: &[Option<f64>]) -> BarSeries {
        BarSeries {
            label: "x".into(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn segments_stack_bottom_up() {
        let layers = [bars(&[Some(2.0)]), bars(&[Some(3.0)])];
        let segs = stack_segments(&layers, 0);
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].bottom, segs[0].top), (0.0, 2.0));
        assert_eq!((segs[1].bottom, segs[1].top), (2.0, 5.0));
    }

    #[test]
    fn missing_layer_adds_no_height() {
        let layers = [bars(&[None]), bars(&[Some(3.0)])];
        let segs = stack_segments(&layers, 0);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].layer, 1);
        assert_eq!((segs[0].bottom, segs[0].top), (0.0, 3.0));
    }
}
