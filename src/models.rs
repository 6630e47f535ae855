use crate::error::{LookupError, ParseError};
use serde::{Deserialize, Serialize};

/// Header of the country name column in World Bank exports.
pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";
/// Header of the indicator name column.
pub const SERIES_NAME: &str = "Series Name";
pub const SERIES_CODE: &str = "Series Code";

/// Identifier columns every input file must carry.
pub const ID_COLUMNS: [&str; 4] = [COUNTRY_NAME, COUNTRY_CODE, SERIES_NAME, SERIES_CODE];

/// Cell texts read as "no observation": DataBank's `..` plus the usual
/// NA spellings of spreadsheet and pandas exports.
const MISSING_MARKERS: [&str; 12] = [
    "..", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "-NaN", "null", "NULL", "#N/A", "<NA>",
];

/// A rectangular table of raw text cells, as read from the CSV.
///
/// Every row holds exactly `headers.len()` cells. Tables are never mutated
/// after construction; filtering and reshaping build new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`Table::column_index`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize, LookupError> {
        self.column_index(name)
            .ok_or_else(|| LookupError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Keep the rows for which `keep` returns true.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[String]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|r| keep(r.as_slice()))
            .cloned()
            .collect();
        Table::new(self.headers.clone(), rows)
    }
}

/// One (key, year, value) observation in long/tidy form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    /// Row key, typically the country name.
    pub key: String,
    /// Four-digit year label, e.g. `"2010"`.
    pub year: String,
    /// `None` when the source cell was empty.
    pub value: Option<f64>,
}

impl LongRecord {
    /// The year label as a number; anything but four ASCII digits is a
    /// [`ParseError::YearLabel`].
    pub fn year_number(&self) -> Result<i32, ParseError> {
        let bad = || ParseError::YearLabel {
            label: self.year.clone(),
        };
        if self.year.len() != 4 {
            return Err(bad());
        }
        year_prefix(&self.year)?.parse().map_err(|_| bad())
    }
}

/// Column of a [`PivotTable`]: one (year, column-key) combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PivotColumn {
    pub year: String,
    pub key: String,
}

/// Wide summary keyed by one field, with (year, key) columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    /// Name of the column the rows are keyed by.
    pub row_key: String,
    /// Distinct row keys, ascending.
    pub rows: Vec<String>,
    pub columns: Vec<PivotColumn>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn get(&self, row: &str, column: &PivotColumn) -> Option<f64> {
        let r = self.rows.iter().position(|k| k == row)?;
        let c = self.columns.iter().position(|k| k == column)?;
        self.cells[r][c]
    }
}

/// Normalise a year column label to its leading 4-digit prefix.
///
/// `"2010 [YR2010]"` → `"2010"`.
pub fn year_prefix(label: &str) -> Result<&str, ParseError> {
    match label.get(..4) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => Ok(prefix),
        _ => Err(ParseError::YearLabel {
            label: label.to_string(),
        }),
    }
}

/// Parse a numeric cell. Empty cells, NA markers and non-finite numbers
/// (`NaN`, `inf`) are missing values.
/// Returns `Err(())` for any other non-numeric text; callers attach context.
pub fn parse_value(cell: &str) -> Result<Option<f64>, ()> {
    let t = cell.trim();
    if t.is_empty() || MISSING_MARKERS.contains(&t) {
        return Ok(None);
    }
    let v = t.parse::<f64>().map_err(|_| ())?;
    Ok(v.is_finite().then_some(v))
}
