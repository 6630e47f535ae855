use anyhow::Result;
use clap::{Parser, ValueEnum};
use climate_charts::config::{PipelineConfig, load_config};
use climate_charts::pipeline::{build_report, export_report};
use climate_charts::stats::ColumnSummary;
use climate_charts::viz::{LegendMode, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "climate-charts",
    version,
    about = "Chart CO2 and greenhouse-gas emissions from a World Bank DataBank CSV"
)]
struct Cli {
    /// JSON configuration file (fields not given keep their defaults).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input CSV (overrides the configuration).
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Directory the charts are written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Chart image format.
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,
    /// Chart width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Chart height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Locale for tick labels (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// Legend placement.
    #[arg(long, value_enum)]
    legend: Option<LegendPlacement>,
    /// TrueType font used for chart text.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Skip writing chart files.
    #[arg(long, default_value_t = false)]
    no_export: bool,
    /// Skip printing the summary statistics.
    #[arg(long, default_value_t = false)]
    no_stats: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ImageFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LegendPlacement {
    Right,
    Top,
    Bottom,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn print_summary(title: &str, rows: &[ColumnSummary]) {
    println!("{title}");
    println!(
        "{:<16} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in rows {
        println!(
            "{:<16} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
            s.column,
            s.count,
            fmt_opt(s.mean),
            fmt_opt(s.std),
            fmt_opt(s.min),
            fmt_opt(s.q25),
            fmt_opt(s.median),
            fmt_opt(s.q75),
            fmt_opt(s.max)
        );
    }
    println!();
}

fn apply_overrides(cli: &Cli, cfg: &mut PipelineConfig) {
    if let Some(p) = &cli.input {
        cfg.input = p.clone();
    }
    let out = &mut cfg.output;
    if let Some(d) = &cli.out_dir {
        out.dir = d.clone();
    }
    if let Some(f) = cli.format {
        out.format = match f {
            ImageFormat::Svg => OutputFormat::Svg,
            ImageFormat::Png => OutputFormat::Png,
        };
    }
    if let Some(w) = cli.width {
        out.width = w;
    }
    if let Some(h) = cli.height {
        out.height = h;
    }
    if let Some(l) = &cli.locale {
        out.locale = l.clone();
    }
    if let Some(l) = cli.legend {
        out.legend = match l {
            LegendPlacement::Right => LegendMode::Right,
            LegendPlacement::Top => LegendMode::Top,
            LegendPlacement::Bottom => LegendMode::Bottom,
        };
    }
    if let Some(f) = &cli.font {
        out.font = Some(f.clone());
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    apply_overrides(&cli, &mut cfg);

    let report = build_report(&cfg)?;

    if !cli.no_export {
        let written = export_report(&report, &cfg.output)?;
        eprintln!("Wrote {} charts to {}", written.len(), cfg.output.dir.display());
    }

    if !cli.no_stats {
        print_summary(
            &format!("Summary: {}", cfg.line.series),
            &report.series_summary,
        );
        print_summary("Summary: all series", &report.raw_summary);
    }

    Ok(())
}
