use climate_charts::models::{COUNTRY_NAME, PivotColumn, SERIES_NAME, Table};
use climate_charts::reshape::{Aggregate, melt_years, pivot};
use climate_charts::select::{select_country, select_series, single_row, year_columns};
use climate_charts::{Error, LookupError, ParseError};

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|s| s.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
}

const HEADERS: [&str; 6] = [
    "Country Name",
    "Country Code",
    "Series Name",
    "Series Code",
    "2010 [YR2010]",
    "2011 [YR2011]",
];

fn two_countries() -> Table {
    table(
        &HEADERS,
        &[
            &["A", "AAA", "S", "S.1", "1", "2"],
            &["B", "BBB", "S", "S.1", "3", "4"],
            &["A", "AAA", "T", "T.1", "10", ""],
        ],
    )
}

#[test]
fn select_series_keeps_matching_rows_in_order() {
    let t = two_countries();
    let s = select_series(&t, "S").unwrap();
    assert_eq!(s.headers, t.headers);
    assert_eq!(s.len(), 2);
    assert_eq!(s.rows[0][0], "A");
    assert_eq!(s.rows[1][0], "B");

    let none = select_series(&t, "nope").unwrap();
    assert!(none.is_empty());
    assert_eq!(none.headers.len(), 6);
}

#[test]
fn select_country_filters_by_name() {
    let t = two_countries();
    let a = select_country(&t, "A").unwrap();
    assert_eq!(a.len(), 2);
    assert!(a.rows.iter().all(|r| r[0] == "A"));
}

#[test]
fn selecting_without_series_column_is_a_lookup_error() {
    let t = table(&["Country Name", "2010 [YR2010]"], &[&["A", "1"]]);
    let err = select_series(&t, "S").unwrap_err();
    assert!(matches!(
        err,
        Error::Lookup(LookupError::MissingColumn { ref column }) if column == "Series Name"
    ));
}

#[test]
fn single_row_reports_absent_and_duplicate_pairs() {
    let mut t = two_countries();
    let (idx, row) = single_row(&t, "B", "S").unwrap();
    assert_eq!(idx, 1);
    assert_eq!(row[4], "3");

    assert!(matches!(
        single_row(&t, "C", "S"),
        Err(Error::Lookup(LookupError::NoMatch { .. }))
    ));

    t.rows.push(t.rows[1].clone());
    match single_row(&t, "B", "S") {
        Err(Error::Lookup(LookupError::Ambiguous { count, .. })) => assert_eq!(count, 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn year_columns_resolve_labels() {
    let t = two_countries();
    let cols = year_columns(&t, &[2011, 2010]).unwrap();
    assert_eq!(cols, vec!["2011 [YR2011]", "2010 [YR2010]"]);

    let err = year_columns(&t, &[1990]).unwrap_err();
    assert!(matches!(
        err,
        Error::Lookup(LookupError::MissingYear { year: 1990 })
    ));
}

#[test]
fn melt_emits_one_record_per_row_and_year() {
    let t = two_countries();
    let s = select_series(&t, "S").unwrap();
    let recs = melt_years(&s, &["2010 [YR2010]", "2011 [YR2011]"], COUNTRY_NAME).unwrap();

    let flat: Vec<(&str, &str, Option<f64>)> = recs
        .iter()
        .map(|r| (r.key.as_str(), r.year.as_str(), r.value))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("A", "2010", Some(1.0)),
            ("A", "2011", Some(2.0)),
            ("B", "2010", Some(3.0)),
            ("B", "2011", Some(4.0)),
        ]
    );
    assert_eq!(recs[3].year_number(), Ok(2011));
}

#[test]
fn melt_keeps_missing_cells_as_none() {
    let t = two_countries();
    let recs = melt_years(&t, &["2011 [YR2011]"], COUNTRY_NAME).unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[2].key, "A");
    assert_eq!(recs[2].value, None);
}

#[test]
fn melt_reads_nan_and_na_markers_as_missing() {
    let t = table(
        &HEADERS,
        &[
            &["A", "AAA", "S", "S.1", "NaN", "2"],
            &["B", "BBB", "S", "S.1", "inf", "NA"],
        ],
    );
    let recs = melt_years(&t, &["2010 [YR2010]", "2011 [YR2011]"], COUNTRY_NAME).unwrap();
    let values: Vec<Option<f64>> = recs.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![None, Some(2.0), None, None]);
}

#[test]
fn melt_rejects_a_non_year_column() {
    let t = two_countries();
    let err = melt_years(&t, &["Series Code"], COUNTRY_NAME).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::YearLabel { .. })));
}

#[test]
fn melt_rejects_text_in_value_cells() {
    let t = table(&HEADERS, &[&["A", "AAA", "S", "S.1", "abc", "2"]]);
    let err = melt_years(&t, &["2010 [YR2010]"], COUNTRY_NAME).unwrap_err();
    match err {
        Error::Parse(ParseError::Number { column, row, cell }) => {
            assert_eq!(column, "2010 [YR2010]");
            assert_eq!(row, 0);
            assert_eq!(cell, "abc");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn pivot_sorts_rows_and_orders_columns_by_year_then_key() {
    let t = table(
        &HEADERS,
        &[
            &["B", "BBB", "T", "T.1", "5", "6"],
            &["A", "AAA", "S", "S.1", "1", "2"],
            &["A", "AAA", "T", "T.1", "3", ""],
        ],
    );
    let p = pivot(
        &t,
        &["2010 [YR2010]", "2011 [YR2011]"],
        COUNTRY_NAME,
        SERIES_NAME,
        Aggregate::Sum,
    )
    .unwrap();

    assert_eq!(p.row_key, "Country Name");
    assert_eq!(p.rows, vec!["A", "B"]);
    let labels: Vec<(&str, &str)> = p
        .columns
        .iter()
        .map(|c| (c.year.as_str(), c.key.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![("2010", "S"), ("2010", "T"), ("2011", "S"), ("2011", "T")]
    );

    let col = |year: &str, key: &str| PivotColumn {
        year: year.to_string(),
        key: key.to_string(),
    };
    assert_eq!(p.get("A", &col("2010", "T")), Some(3.0));
    assert_eq!(p.get("A", &col("2011", "T")), None);
    // B has no S row at all
    assert_eq!(p.get("B", &col("2010", "S")), None);
    assert_eq!(p.get("B", &col("2011", "T")), Some(6.0));
}

#[test]
fn pivot_aggregates_duplicate_rows() {
    let t = table(
        &HEADERS,
        &[
            &["A", "AAA", "S", "S.1", "1", "2"],
            &["A", "AAA", "S", "S.1", "3", ""],
        ],
    );
    let years = ["2010 [YR2010]", "2011 [YR2011]"];
    let key = PivotColumn {
        year: "2010".into(),
        key: "S".into(),
    };

    let sum = pivot(&t, &years, COUNTRY_NAME, SERIES_NAME, Aggregate::Sum).unwrap();
    assert_eq!(sum.get("A", &key), Some(4.0));
    let mean = pivot(&t, &years, COUNTRY_NAME, SERIES_NAME, Aggregate::Mean).unwrap();
    assert_eq!(mean.get("A", &key), Some(2.0));
    let first = pivot(&t, &years, COUNTRY_NAME, SERIES_NAME, Aggregate::First).unwrap();
    assert_eq!(first.get("A", &key), Some(1.0));

    // only one value present for 2011
    let k2011 = PivotColumn {
        year: "2011".into(),
        key: "S".into(),
    };
    assert_eq!(mean.get("A", &k2011), Some(2.0));
}

#[test]
fn pivot_of_empty_table_is_empty() {
    let t = table(&HEADERS, &[]);
    let p = pivot(&t, &["2010 [YR2010]"], COUNTRY_NAME, SERIES_NAME, Aggregate::Sum).unwrap();
    assert!(p.rows.is_empty());
    assert!(p.columns.is_empty());
    assert!(p.cells.is_empty());
}
