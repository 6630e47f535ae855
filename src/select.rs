//! Row and column selection on a loaded [`Table`].

use crate::error::{LookupError, Result};
use crate::models::{COUNTRY_NAME, SERIES_NAME, Table, year_prefix};

/// Rows whose `Series Name` equals `series_name` exactly (case-sensitive).
///
/// An unknown series yields an empty table with the same headers.
pub fn select_series(table: &Table, series_name: &str) -> Result<Table> {
    let col = table.require_column(SERIES_NAME)?;
    Ok(table.filter_rows(|row| row[col] == series_name))
}

/// Rows whose `Country Name` equals `country_name` exactly.
pub fn select_country(table: &Table, country_name: &str) -> Result<Table> {
    let col = table.require_column(COUNTRY_NAME)?;
    Ok(table.filter_rows(|row| row[col] == country_name))
}

/// The single row for `(country, series)`, with its index.
///
/// Zero matches is [`LookupError::NoMatch`], more than one is
/// [`LookupError::Ambiguous`].
pub fn single_row<'t>(
    table: &'t Table,
    country: &str,
    series: &str,
) -> Result<(usize, &'t [String])> {
    let c = table.require_column(COUNTRY_NAME)?;
    let s = table.require_column(SERIES_NAME)?;
    let mut hits = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row[c] == country && row[s] == series);

    let (index, first) = hits.next().ok_or_else(|| LookupError::NoMatch {
        country: country.to_string(),
        series: series.to_string(),
    })?;
    let extra = hits.count();
    if extra > 0 {
        return Err(LookupError::Ambiguous {
            country: country.to_string(),
            series: series.to_string(),
            count: extra + 1,
        }
        .into());
    }
    Ok((index, first.as_slice()))
}

/// Resolve years to the header labels carrying them (`2010` → `"2010 [YR2010]"`).
///
/// The first header whose 4-digit prefix matches wins; output follows the
/// order of `years`.
pub fn year_columns(table: &Table, years: &[i32]) -> Result<Vec<String>> {
    years
        .iter()
        .map(|&year| -> Result<String> {
            table
                .headers
                .iter()
                .find(|h| {
                    year_prefix(h)
                        .ok()
                        .and_then(|p| p.parse::<i32>().ok())
                        == Some(year)
                })
                .cloned()
                .ok_or_else(|| LookupError::MissingYear { year }.into())
        })
        .collect()
}
