//! Wide → long (`melt_years`) and wide → pivoted (`pivot`) reshaping.

use crate::error::{ParseError, Result};
use crate::models::{LongRecord, PivotColumn, PivotTable, Table, parse_value, year_prefix};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How several values landing in one pivot cell are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    #[default]
    Sum,
    Mean,
    Min,
    Max,
    /// First value in table order.
    First,
}

impl Aggregate {
    /// Combine `values`; `None` when there is nothing to combine.
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let v = match self {
            Aggregate::Sum => values.iter().sum(),
            Aggregate::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregate::First => values[0],
        };
        Some(v)
    }
}

/// Resolve column names to indices and normalised year labels.
fn resolve_years<'a, S: AsRef<str>>(
    table: &Table,
    year_columns: &'a [S],
) -> Result<Vec<(usize, &'a str)>> {
    year_columns
        .iter()
        .map(|label| -> Result<(usize, &'a str)> {
            let label = label.as_ref();
            let idx = table.require_column(label)?;
            Ok((idx, year_prefix(label)?))
        })
        .collect()
}

fn cell_value(table: &Table, row: usize, col: usize) -> Result<Option<f64>> {
    let cell = &table.rows[row][col];
    parse_value(cell).map_err(|_| {
        ParseError::Number {
            column: table.headers[col].clone(),
            row,
            cell: cell.clone(),
        }
        .into()
    })
}

/// Melt the given year columns into one [`LongRecord`] per (row, year).
///
/// Records are grouped by row (table order), then follow the order of
/// `year_columns`, so each key's records are chronological when the columns
/// are. Empty cells become `value: None`.
pub fn melt_years<S: AsRef<str>>(
    table: &Table,
    year_columns: &[S],
    id_column: &str,
) -> Result<Vec<LongRecord>> {
    let id = table.require_column(id_column)?;
    let years = resolve_years(table, year_columns)?;

    let mut out = Vec::with_capacity(table.len() * years.len());
    for (ri, row) in table.rows.iter().enumerate() {
        for &(ci, year) in &years {
            out.push(LongRecord {
                key: row[id].clone(),
                year: year.to_string(),
                value: cell_value(table, ri, ci)?,
            });
        }
    }
    Ok(out)
}

/// Pivot `year_columns` into a table keyed by `row_key` with one column per
/// observed `(year, column_key value)` pair.
///
/// Rows are the distinct `row_key` values in ascending order. Columns follow
/// `year_columns` order, then ascending column-key value. A cell aggregates
/// the non-missing values of all matching rows and is `None` when there are
/// none.
pub fn pivot<S: AsRef<str>>(
    table: &Table,
    year_columns: &[S],
    row_key: &str,
    column_key: &str,
    aggregate: Aggregate,
) -> Result<PivotTable> {
    let rk = table.require_column(row_key)?;
    let ck = table.require_column(column_key)?;
    let years = resolve_years(table, year_columns)?;

    let mut rows: BTreeSet<&str> = BTreeSet::new();
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    let mut buckets: BTreeMap<(&str, usize, &str), Vec<f64>> = BTreeMap::new();

    for (ri, row) in table.rows.iter().enumerate() {
        rows.insert(row[rk].as_str());
        keys.insert(row[ck].as_str());
        for (yi, &(ci, _)) in years.iter().enumerate() {
            let bucket = buckets
                .entry((row[rk].as_str(), yi, row[ck].as_str()))
                .or_default();
            if let Some(v) = cell_value(table, ri, ci)? {
                bucket.push(v);
            }
        }
    }

    // A (year, key) pair is observed when at least one row carries the key;
    // every year column exists for every row, so that is all keys × years.
    let mut columns = Vec::with_capacity(years.len() * keys.len());
    let mut column_slots = Vec::with_capacity(columns.capacity());
    for (yi, &(_, year)) in years.iter().enumerate() {
        for key in &keys {
            columns.push(PivotColumn {
                year: year.to_string(),
                key: key.to_string(),
            });
            column_slots.push((yi, *key));
        }
    }

    let cells = rows
        .iter()
        .map(|r| {
            column_slots
                .iter()
                .map(|&(yi, key)| {
                    buckets
                        .get(&(*r, yi, key))
                        .and_then(|vals| aggregate.apply(vals))
                })
                .collect()
        })
        .collect();

    Ok(PivotTable {
        row_key: row_key.to_string(),
        rows: rows.into_iter().map(str::to_string).collect(),
        columns,
        cells,
    })
}
