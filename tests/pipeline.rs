use climate_charts::charts::ChartBody;
use climate_charts::config::PipelineConfig;
use climate_charts::pipeline::{build_report, export_report};
use climate_charts::viz::{OutputFormat, fonts};
use climate_charts::{Error, LookupError};
use std::path::PathBuf;

fn sample_config() -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.input = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/climate_sample.csv");
    cfg.line.years = vec![2010, 2011, 2012];
    cfg.grouped_bar.years = vec![2010, 2012];
    cfg.stacked.years = vec![2010, 2011, 2012];
    cfg
}

#[test]
fn build_report_renders_all_three_charts() {
    let report = build_report(&sample_config()).unwrap();

    assert_eq!(report.raw.len(), 6);
    assert_eq!(report.transposed.headers[1], "United Kingdom");
    assert_eq!(report.series_table.len(), 2);

    assert_eq!(
        report.line.legend_labels(),
        vec!["France", "United Kingdom"]
    );
    assert_eq!(report.grouped_bar.legend_labels().len(), 6);
    assert_eq!(
        report.stacked.legend_labels(),
        vec!["CO2 Emission", "Greenhouse Gas Emission"]
    );
    assert_eq!(report.stacked.title, "UK: Yearly CO2 and Greenhouse Gas Emissions");

    let stems: Vec<&str> = report.charts().iter().map(|(s, _)| *s).collect();
    assert_eq!(stems, vec!["line_chart", "grouped_bar_chart", "stacked_bar_chart"]);

    // year columns only
    assert_eq!(report.series_summary.len(), 3);
    assert_eq!(report.series_summary[0].count, 2);
    assert_eq!(report.series_summary[1].count, 1);
    assert_eq!(report.raw_summary[0].count, 6);
}

#[test]
fn grouped_bar_series_filter_applies() {
    let mut cfg = sample_config();
    cfg.grouped_bar.series = vec!["CO2 emissions (kt)".into()];
    let report = build_report(&cfg).unwrap();
    let ChartBody::GroupedBars { series, .. } = &report.grouped_bar.body else {
        panic!("expected grouped bars");
    };
    assert_eq!(series.len(), 2);
    assert!(series.iter().all(|s| s.label.ends_with("CO2 emissions (kt)")));
}

#[test]
fn years_absent_from_the_file_fail_the_build() {
    let mut cfg = sample_config();
    cfg.line.years = vec![2010, 2030];
    let err = build_report(&cfg).unwrap_err();
    assert!(matches!(
        err,
        Error::Lookup(LookupError::MissingYear { year: 2030 })
    ));
}

#[test]
fn export_report_writes_one_file_per_chart() {
    if fonts::find_font(None).is_none() {
        eprintln!("skipping: no system font available");
        return;
    }
    let report = build_report(&sample_config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = sample_config();
    cfg.output.dir = dir.path().join("charts");
    cfg.output.format = OutputFormat::Svg;

    let written = export_report(&report, &cfg.output).unwrap();
    assert_eq!(written.len(), 3);
    for path in &written {
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("<svg"), "{}", path.display());
    }
    assert!(written[2].ends_with("stacked_bar_chart.svg"));
}
