//! Read a World Bank DataBank CSV export into a [`Table`].
//!
//! The file is read once. Besides the raw table the loader builds a
//! transposed view (one row per original column, countries across).

use crate::error::{LoadError, Result};
use crate::models::{ID_COLUMNS, Table};
use csv::ReaderBuilder;
use log::debug;
use std::path::Path;

/// Load `path` and return `(raw, transposed)`.
///
/// The raw table mirrors the file exactly. Every record must have as many
/// fields as the header, and the four identifier columns
/// (`Country Name`, `Country Code`, `Series Name`, `Series Code`) must exist.
///
/// ```no_run
/// let (raw, _transposed) = climate_charts::loader::load("climate_data.csv")?;
/// println!("{} rows", raw.len());
/// # Ok::<(), climate_charts::Error>(())
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<(Table, Table)> {
    let path = path.as_ref();
    let raw = read_table(path)?;
    let transposed = transpose(&raw);
    debug!(
        "loaded {}: raw {:?}, transposed {:?}",
        path.display(),
        raw.shape(),
        transposed.shape()
    );
    Ok((raw, transposed))
}

fn read_table(path: &Path) -> std::result::Result<Table, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let malformed = |source: csv::Error| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = rdr
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    for column in ID_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(malformed)?;
        rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok(Table::new(headers, rows))
}

/// Swap rows and columns, then promote the first resulting row to headers.
///
/// The original header labels become the first column, so for a DataBank
/// export the promoted header is `["Country Name", <country>...]` and the
/// remaining rows start with `"Country Code"`, `"Series Name"`, the year
/// labels, and so on.
pub fn transpose(table: &Table) -> Table {
    let mut swapped: Vec<Vec<String>> = table
        .headers
        .iter()
        .enumerate()
        .map(|(ci, header)| {
            let mut line = Vec::with_capacity(table.rows.len() + 1);
            line.push(header.clone());
            line.extend(table.rows.iter().map(|r| r[ci].clone()));
            line
        })
        .collect();

    if swapped.is_empty() {
        return Table::default();
    }
    let headers = swapped.remove(0);
    Table::new(headers, swapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn transpose_promotes_first_column_values() {
        let raw = t(
            &["Country Name", "Series Name", "2010 [YR2010]"],
            &[&["A", "S", "1"], &["B", "S", "2"]],
        );
        let tr = transpose(&raw);
        assert_eq!(tr.headers, vec!["Country Name", "A", "B"]);
        assert_eq!(tr.rows.len(), 2);
        assert_eq!(tr.rows[0], vec!["Series Name", "S", "S"]);
        assert_eq!(tr.rows[1], vec!["2010 [YR2010]", "1", "2"]);
    }

    #[test]
    fn transpose_of_header_only_table() {
        let raw = t(&["Country Name", "2010 [YR2010]"], &[]);
        let tr = transpose(&raw);
        assert_eq!(tr.headers, vec!["Country Name"]);
        assert_eq!(tr.rows, vec![vec!["2010 [YR2010]".to_string()]]);
    }
}
