use climate_charts::charts::{BarSeries, ChartBody, ChartKind, RenderedChart, render_line};
use climate_charts::models::LongRecord;
use climate_charts::viz::{ExportOptions, LegendMode, export_chart, fonts};

fn have_font() -> bool {
    let found = fonts::find_font(None).is_some();
    if !found {
        eprintln!("skipping: no system font available");
    }
    found
}

fn line_chart() -> RenderedChart {
    let records: Vec<LongRecord> = [
        ("Germany", "2010", Some(0.21)),
        ("Germany", "2011", None),
        ("Germany", "2012", Some(0.19)),
        ("Malta", "2012", Some(0.05)),
    ]
    .into_iter()
    .map(|(k, y, v)| LongRecord {
        key: k.into(),
        year: y.into(),
        value: v,
    })
    .collect();
    render_line(&records, "CO2 per GDP", "kg per GDP").unwrap()
}

fn grouped_chart() -> RenderedChart {
    RenderedChart {
        kind: ChartKind::GroupedBar,
        title: "Greenhouse gases".into(),
        x_label: "Country".into(),
        y_label: "Emissions".into(),
        body: ChartBody::GroupedBars {
            categories: vec!["France".into(), "United Kingdom".into()],
            series: vec![
                BarSeries {
                    label: "2010, CO2 emissions (kt)".into(),
                    values: vec![Some(330_000.0), Some(480_000.0)],
                },
                BarSeries {
                    label: "2020, CO2 emissions (kt)".into(),
                    values: vec![None, Some(310_000.0)],
                },
            ],
        },
    }
}

fn stacked_chart() -> RenderedChart {
    RenderedChart {
        kind: ChartKind::StackedBar,
        title: "UK".into(),
        x_label: "Year".into(),
        y_label: "Emissions (kt)".into(),
        body: ChartBody::StackedBars {
            categories: vec!["2010".into(), "2011".into()],
            layers: vec![
                BarSeries {
                    label: "CO2 Emission".into(),
                    values: vec![Some(480_000.0), Some(440_000.0)],
                },
                BarSeries {
                    label: "Greenhouse Gas Emission".into(),
                    values: vec![Some(600_000.0), None],
                },
            ],
        },
    }
}

#[test]
fn svg_export_contains_titles_and_legend() {
    if !have_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    for (name, chart) in [
        ("line.svg", line_chart()),
        ("grouped.svg", grouped_chart()),
        ("stacked.svg", stacked_chart()),
    ] {
        let path = dir.path().join(name);
        export_chart(&chart, &path, &ExportOptions::default()).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(&chart.title), "{name}: title missing");
        for label in chart.legend_labels() {
            assert!(svg.contains(label), "{name}: legend entry {label} missing");
        }
    }
}

#[test]
fn png_export_writes_a_bitmap_for_each_legend_mode() {
    if !have_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    for (i, legend) in [LegendMode::Right, LegendMode::Top, LegendMode::Bottom]
        .into_iter()
        .enumerate()
    {
        let opts = ExportOptions {
            width: 640,
            height: 400,
            legend,
            ..ExportOptions::default()
        };
        let path = dir.path().join(format!("stacked_{i}.png"));
        export_chart(&stacked_chart(), &path, &opts).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}

#[test]
fn empty_chart_still_exports() {
    if !have_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let chart = render_line(&[], "Nothing", "y").unwrap();
    let path = dir.path().join("empty.svg");
    export_chart(&chart, &path, &ExportOptions::default()).unwrap();
    assert!(path.exists());
}
