//! The report pipeline: load once, then select, reshape, render and
//! summarise. Exporting the charts is a separate step.

use crate::charts::{RenderedChart, render_grouped_bar, render_line, render_stacked};
use crate::config::{OutputConfig, PipelineConfig};
use crate::error::Result;
use crate::loader::load;
use crate::models::{COUNTRY_NAME, SERIES_NAME, Table};
use crate::reshape::melt_years;
use crate::select::{select_series, year_columns};
use crate::stats::{ColumnSummary, describe};
use crate::viz::{ExportOptions, export_chart};
use anyhow::Context;
use log::info;
use std::path::PathBuf;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Report {
    pub raw: Table,
    pub transposed: Table,
    /// Rows of the line chart's series.
    pub series_table: Table,
    pub line: RenderedChart,
    pub grouped_bar: RenderedChart,
    pub stacked: RenderedChart,
    /// `describe` of `series_table`.
    pub series_summary: Vec<ColumnSummary>,
    /// `describe` of `raw`.
    pub raw_summary: Vec<ColumnSummary>,
}

impl Report {
    /// The charts with the file stem each is exported under.
    pub fn charts(&self) -> [(&'static str, &RenderedChart); 3] {
        [
            ("line_chart", &self.line),
            ("grouped_bar_chart", &self.grouped_bar),
            ("stacked_bar_chart", &self.stacked),
        ]
    }
}

/// Run load → select → reshape → render → describe for `config`.
pub fn build_report(config: &PipelineConfig) -> Result<Report> {
    let (raw, transposed) = load(&config.input)?;
    info!(
        "loaded {} rows x {} columns from {}",
        raw.shape().0,
        raw.shape().1,
        config.input.display()
    );

    let line_cfg = &config.line;
    let series_table = select_series(&raw, &line_cfg.series)?;
    info!("{} rows for series '{}'", series_table.len(), line_cfg.series);
    let line_years = year_columns(&raw, &line_cfg.years)?;
    let records = melt_years(&series_table, &line_years, COUNTRY_NAME)?;
    let line = render_line(&records, &line_cfg.title, &line_cfg.y_label)?;

    let bar_cfg = &config.grouped_bar;
    let bar_source = if bar_cfg.series.is_empty() {
        raw.clone()
    } else {
        let col = raw.require_column(SERIES_NAME)?;
        raw.filter_rows(|row| bar_cfg.series.iter().any(|s| *s == row[col]))
    };
    let bar_years = year_columns(&raw, &bar_cfg.years)?;
    let grouped_bar = render_grouped_bar(&bar_source, &bar_years, &bar_cfg.title)?;

    let st = &config.stacked;
    let stacked_years = year_columns(&raw, &st.years)?;
    let stacked = render_stacked(&raw, &st.country, &st.series_a, &st.series_b, &stacked_years)?
        .with_title(&st.title)
        .with_y_label(&st.y_label)
        .with_legend_labels(&st.legend);
    if let crate::charts::ChartBody::StackedBars { layers, .. } = &stacked.body {
        for layer in layers {
            info!("{} / {}: {:?}", st.country, layer.label, layer.values);
        }
    }

    let series_summary = describe(&series_table);
    let raw_summary = describe(&raw);

    Ok(Report {
        raw,
        transposed,
        series_table,
        line,
        grouped_bar,
        stacked,
        series_summary,
        raw_summary,
    })
}

/// Write the report's charts into `output.dir` and return the written paths.
pub fn export_report(report: &Report, output: &OutputConfig) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&output.dir)
        .with_context(|| format!("creating output directory {}", output.dir.display()))?;
    let opts = ExportOptions::from(output);

    let mut written = Vec::with_capacity(3);
    for (stem, chart) in report.charts() {
        let path = output
            .dir
            .join(format!("{stem}.{}", output.format.extension()));
        export_chart(chart, &path, &opts)
            .with_context(|| format!("exporting {}", path.display()))?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
