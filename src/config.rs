//! Pipeline configuration.
//!
//! Every file name, series name, country, year list and title the report
//! uses lives here. [`PipelineConfig::default`] reproduces the stock CO2 /
//! greenhouse-gas report; a JSON file may override any subset of fields.

use crate::viz::{LegendMode, OutputFormat};
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn years(start: i32, end: i32) -> Vec<i32> {
    (start..=end).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// DataBank CSV export to read.
    pub input: PathBuf,
    pub line: LineChartConfig,
    pub grouped_bar: GroupedBarConfig,
    pub stacked: StackedChartConfig,
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("climate_data.csv"),
            line: LineChartConfig::default(),
            grouped_bar: GroupedBarConfig::default(),
            stacked: StackedChartConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Per-country trend of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub series: String,
    pub years: Vec<i32>,
    pub title: String,
    pub y_label: String,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            series: "CO2 emissions (kg per 2015 US$ of GDP)".into(),
            years: years(2010, 2020),
            title: "European Countries CO2 Emissions Per GDP from 2010 to 2020".into(),
            y_label: "CO2 Emissions (kg per GDP)".into(),
        }
    }
}

/// Country comparison at a few snapshot years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupedBarConfig {
    pub years: Vec<i32>,
    /// Restrict to these series; empty keeps every series in the file.
    pub series: Vec<String>,
    pub title: String,
}

impl Default for GroupedBarConfig {
    fn default() -> Self {
        Self {
            years: vec![2010, 2015, 2020],
            series: Vec::new(),
            title: "Greenhouse Gas Emissions by Country".into(),
        }
    }
}

/// Two series stacked for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedChartConfig {
    pub country: String,
    /// Base segment.
    pub series_a: String,
    /// Stacked on top of `series_a`.
    pub series_b: String,
    pub years: Vec<i32>,
    pub title: String,
    pub y_label: String,
    /// Legend text for `series_a` and `series_b`; empty keeps the series names.
    pub legend: Vec<String>,
}

impl Default for StackedChartConfig {
    fn default() -> Self {
        Self {
            country: "United Kingdom".into(),
            series_a: "CO2 emissions (kt)".into(),
            series_b: "Total greenhouse gas emissions (kt of CO2 equivalent)".into(),
            years: years(2010, 2020),
            title: "UK: Yearly CO2 and Greenhouse Gas Emissions".into(),
            y_label: "Emissions (kt)".into(),
            legend: vec!["CO2 Emission".into(), "Greenhouse Gas Emission".into()],
        }
    }
}

/// Where and how charts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    /// Tick label locale tag (`en`, `de`, ...).
    pub locale: String,
    pub legend: LegendMode,
    /// TrueType font for labels; system locations are searched when unset.
    pub font: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("charts"),
            format: OutputFormat::Svg,
            width: 1000,
            height: 600,
            locale: "en".into(),
            legend: LegendMode::Right,
            font: None,
        }
    }
}

/// Read a JSON configuration file. Absent fields keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}
