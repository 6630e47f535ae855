//! climate_charts
//!
//! Reshape World Bank DataBank climate exports (countries × series × years)
//! and chart CO2 / greenhouse-gas emissions. Pairs with the `climate-charts`
//! CLI.
//!
//! ### Features
//! - Load a DataBank CSV once, plus a transposed view
//! - Select series, melt year columns to tidy records, pivot by country
//! - Line, grouped bar and stacked bar charts as plain values
//! - Export charts to SVG/PNG; `describe`-style column statistics
//!
//! ### Example
//! ```no_run
//! use climate_charts::{charts, loader, reshape, select, viz};
//!
//! let (raw, _) = loader::load("climate_data.csv")?;
//! let co2 = select::select_series(&raw, "CO2 emissions (kt)")?;
//! let years = select::year_columns(&raw, &[2010, 2015, 2020])?;
//! let records = reshape::melt_years(&co2, &years, "Country Name")?;
//! let chart = charts::render_line(&records, "CO2 emissions", "kt")?;
//! viz::export_chart(&chart, "co2.svg", &viz::ExportOptions::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod charts;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod reshape;
pub mod select;
pub mod stats;
pub mod viz;

pub use charts::RenderedChart;
pub use config::PipelineConfig;
pub use error::{Error, LoadError, LookupError, ParseError, Result};
pub use models::{LongRecord, PivotTable, Table};
