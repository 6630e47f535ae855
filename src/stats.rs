use crate::models::{ID_COLUMNS, Table, parse_value};
use serde::{Deserialize, Serialize};

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summarise every numeric column of `table`.
///
/// A column is numeric when it is not one of the identifier columns and all
/// of its non-missing cells parse as numbers. Columns without a single value
/// still get a row with `count = 0`, so an empty selection keeps its year
/// columns.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    let mut out = Vec::new();
    'columns: for (ci, name) in table.headers.iter().enumerate() {
        if ID_COLUMNS.contains(&name.as_str()) {
            continue;
        }
        let mut vals = Vec::with_capacity(table.len());
        for row in &table.rows {
            match parse_value(&row[ci]) {
                Ok(Some(v)) => vals.push(v),
                Ok(None) => {}
                Err(()) => continue 'columns,
            }
        }
        out.push(summarize(name, vals));
    }
    out
}

fn summarize(column: &str, mut vals: Vec<f64>) -> ColumnSummary {
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = if count > 0 {
        Some(vals.iter().sum::<f64>() / count as f64)
    } else {
        None
    };
    let std = match mean {
        Some(m) if count > 1 => {
            let ss: f64 = vals.iter().map(|v| (v - m).powi(2)).sum();
            Some((ss / (count - 1) as f64).sqrt())
        }
        _ => None,
    };
    ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: vals.first().copied(),
        q25: quantile(&vals, 0.25),
        median: quantile(&vals, 0.50),
        q75: quantile(&vals, 0.75),
        max: vals.last().copied(),
    }
}

/// Quantile of sorted values with linear interpolation between ranks.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 0.25), Some(1.75));
        assert_eq!(quantile(&v, 0.5), Some(2.5));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn single_value_has_no_std() {
        let s = summarize("x", vec![5.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert_eq!(s.median, Some(5.0));
    }
}
