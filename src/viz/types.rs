//! Public types and constants for the export step.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Legend placement. The legend is always drawn outside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendMode {
    /// Single-column panel right of the plot.
    Right,
    /// Horizontal band above the plot.
    Top,
    /// Horizontal band below the plot.
    Bottom,
}

/// Country names and series labels are long; a side panel keeps them readable.
pub const DEFAULT_LEGEND_MODE: LegendMode = LegendMode::Right;

/// Image format of an exported chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }

    /// `.svg` (any case) is SVG; everything else is rendered as a bitmap.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

/// Canvas and text options for [`super::export_chart`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub width: u32,
    pub height: u32,
    pub locale: String,
    pub legend: LegendMode,
    /// TrueType font to register; system fonts are searched when `None`.
    /// Only the first successful registration in a process takes effect.
    pub font: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            locale: "en".into(),
            legend: DEFAULT_LEGEND_MODE,
            font: None,
        }
    }
}

impl From<&crate::config::OutputConfig> for ExportOptions {
    fn from(cfg: &crate::config::OutputConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            locale: cfg.locale.clone(),
            legend: cfg.legend,
            font: cfg.font.clone(),
        }
    }
}
