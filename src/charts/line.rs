use super::{ChartBody, ChartKind, LineSeries, RenderedChart};
use crate::error::Result;
use crate::models::LongRecord;
use std::collections::BTreeMap;

/// One line per record key (country), year on x, value on y.
///
/// Series are ordered by key for the legend. Points keep the order of
/// `records`, which [`crate::reshape::melt_years`] emits chronologically per
/// key. A key with a single point still yields a series. A record whose
/// year is not four digits is a [`crate::ParseError::YearLabel`].
pub fn render_line(records: &[LongRecord], title: &str, y_label: &str) -> Result<RenderedChart> {
    let mut groups: BTreeMap<&str, Vec<(i32, Option<f64>)>> = BTreeMap::new();
    for r in records {
        groups
            .entry(r.key.as_str())
            .or_default()
            .push((r.year_number()?, r.value));
    }

    let lines = groups
        .into_iter()
        .map(|(key, points)| LineSeries {
            label: key.to_string(),
            points,
        })
        .collect();

    Ok(RenderedChart {
        kind: ChartKind::Line,
        title: title.to_string(),
        x_label: "Year".to_string(),
        y_label: y_label.to_string(),
        body: ChartBody::Lines(lines),
    })
}
