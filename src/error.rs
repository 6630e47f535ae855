//! Error types for the load → reshape → render pipeline.
//!
//! - [`LoadError`] - the input file is absent, unreadable or malformed
//! - [`ParseError`] - a year label or numeric cell has an unexpected shape
//! - [`LookupError`] - a requested column, year, country or series is not there
//!   (or is there more than once where exactly one row is required)
//!
//! [`Error`] wraps all three so `?` works across module boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Errors while reading the indicator CSV.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File missing or not readable.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A record does not match the header (field count, encoding).
    #[error("malformed CSV {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File has no header row at all.
    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },

    /// One of the identifier columns is not in the header.
    #[error("{} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Errors while interpreting cell or header text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("column label '{label}' does not start with a 4-digit year")]
    YearLabel { label: String },

    #[error("cell '{cell}' in column '{column}' (row {row}) is not a number")]
    Number {
        column: String,
        row: usize,
        cell: String,
    },
}

/// Errors while locating columns or rows by name.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no column named '{column}'")]
    MissingColumn { column: String },

    #[error("no column for year {year}")]
    MissingYear { year: i32 },

    #[error("no row for country '{country}' and series '{series}'")]
    NoMatch { country: String, series: String },

    #[error("{count} rows for country '{country}' and series '{series}', expected exactly one")]
    Ambiguous {
        country: String,
        series: String,
        count: usize,
    },
}
