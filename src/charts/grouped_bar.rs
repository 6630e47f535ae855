use super::{BarSeries, ChartBody, ChartKind, RenderedChart};
use crate::error::Result;
use crate::models::{COUNTRY_NAME, SERIES_NAME, Table};
use crate::reshape::{Aggregate, pivot};

/// Compare countries across a few snapshot years.
///
/// Pivots `years` (year column labels) by `Country Name` × `Series Name`
/// with a sum, then emits one cluster per country and one bar per
/// (year, series) pair. Only `table` is read.
pub fn render_grouped_bar<S: AsRef<str>>(
    table: &Table,
    years: &[S],
    title: &str,
) -> Result<RenderedChart> {
    let summary = pivot(table, years, COUNTRY_NAME, SERIES_NAME, Aggregate::Sum)?;

    let series = summary
        .columns
        .iter()
        .enumerate()
        .map(|(ci, col)| BarSeries {
            label: format!("{}, {}", col.year, col.key),
            values: summary.cells.iter().map(|row| row[ci]).collect(),
        })
        .collect();

    Ok(RenderedChart {
        kind: ChartKind::GroupedBar,
        title: title.to_string(),
        x_label: "Country".to_string(),
        y_label: "Emissions".to_string(),
        body: ChartBody::GroupedBars {
            categories: summary.rows,
            series,
        },
    })
}
