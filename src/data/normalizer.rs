//! Dataset Normalizer Module
//! Turns the raw CSV frame into the typed table every chart reads from.

use crate::data::columns;
use crate::data::dates::{from_epoch_days, to_epoch_days, DateParser};
use crate::data::values::{float_values, int_values, label_values, min_max};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Required column `{0}` is missing from the dataset")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Settings for [`normalize`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub index_columns: Vec<String>,
    pub date_columns: Vec<String>,
    pub date_parser: DateParser,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from_config(&crate::config::DashboardConfig::default())
    }
}

impl NormalizeOptions {
    pub fn from_config(config: &crate::config::DashboardConfig) -> Self {
        Self {
            index_columns: config.index_columns.clone(),
            date_columns: config.date_columns.clone(),
            date_parser: DateParser::new(config.date_formats.clone()),
        }
    }
}

/// The loaded dataset after type coercion. Immutable once built.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    df: DataFrame,
    /// Observed domain of every categorical column, sorted
    categories: BTreeMap<String, Vec<String>>,
}

impl NormalizedTable {
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Observed labels of a categorical column.
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.categories.get(column).map(|v| v.as_slice())
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(|k| k.as_str())
    }

    /// Distinct non-null gender labels, sorted.
    pub fn gender_domain(&self) -> PolarsResult<Vec<String>> {
        if let Some(domain) = self.categories(columns::GENDER) {
            return Ok(domain.to_vec());
        }
        // non-text gender codes are not categorical
        let labels: BTreeSet<String> = label_values(&self.df, columns::GENDER)?
            .into_iter()
            .flatten()
            .collect();
        Ok(labels.into_iter().collect())
    }

    /// Whole-number age range covering every observed age.
    pub fn age_bounds(&self) -> PolarsResult<Option<(i64, i64)>> {
        Ok(min_max(&float_values(&self.df, columns::AGE)?)
            .map(|(lo, hi)| (lo.floor() as i64, hi.ceil() as i64)))
    }

    pub fn year_bounds(&self) -> PolarsResult<Option<(i64, i64)>> {
        Ok(min_max(&int_values(&self.df, columns::YEAR_OF_EVENT)?))
    }
}

/// Coerce a raw frame into a [`NormalizedTable`]. The input is left untouched.
///
/// Index columns are dropped, date-bearing fields become `Date` columns with
/// unparseable cells set to null, the remaining text columns become
/// categorical, and `year_of_event` / `month_of_event` are derived from
/// `event_date`.
pub fn normalize(raw: &DataFrame, options: &NormalizeOptions) -> Result<NormalizedTable, SchemaError> {
    for name in columns::REQUIRED {
        if raw.get_column_index(name).is_none() {
            return Err(SchemaError::MissingColumn(name.to_string()));
        }
    }

    let mut df = raw.clone();

    for index in &options.index_columns {
        if df.get_column_index(index).is_some() {
            df = df.drop(index)?;
            log::debug!("Dropped index column {:?}", index);
        }
    }

    let mut date_fields: Vec<&str> = Vec::with_capacity(options.date_columns.len() + 1);
    for name in &options.date_columns {
        if df.get_column_index(name).is_some() {
            date_fields.push(name);
        } else {
            log::warn!("Date column `{}` not present, skipping", name);
        }
    }

    for name in &date_fields {
        let dates = parse_dates(df.column(name)?, &options.date_parser)?;
        df.with_column(date_column(name, &dates)?)?;
    }

    let event_dates = parse_dates(df.column(columns::EVENT_DATE)?, &options.date_parser)?;
    df.with_column(date_column(columns::EVENT_DATE, &event_dates)?)?;

    let years: Vec<Option<i32>> = event_dates.iter().map(|d| d.map(|d| d.year())).collect();
    let months: Vec<Option<i32>> = event_dates
        .iter()
        .map(|d| d.map(|d| d.month() as i32))
        .collect();
    df.with_column(Column::new(columns::YEAR_OF_EVENT.into(), years))?;
    df.with_column(Column::new(columns::MONTH_OF_EVENT.into(), months))?;

    let text_columns: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| matches!(c.dtype(), DataType::String))
        .map(|c| c.name().clone())
        .collect();

    let mut categories = BTreeMap::new();
    for name in text_columns {
        let domain: BTreeSet<String> = label_values(&df, &name)?.into_iter().flatten().collect();
        let categorical = df
            .column(&name)?
            .cast(&DataType::Categorical(None, CategoricalOrdering::Physical))?;
        df.with_column(categorical)?;
        categories.insert(name.to_string(), domain.into_iter().collect());
    }

    log::info!(
        "Normalized {} rows: {} categorical columns, {} date columns",
        df.height(),
        categories.len(),
        date_fields.len() + 1
    );

    let table = NormalizedTable { df, categories };
    log::debug!(
        "Categorical columns: {}",
        table.categorical_columns().collect::<Vec<_>>().join(", ")
    );
    Ok(table)
}

/// Parse one column into calendar dates, logging how many cells were dropped.
fn parse_dates(column: &Column, parser: &DateParser) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let parsed: Vec<Option<NaiveDate>> = match column.dtype() {
        DataType::Date | DataType::Datetime(_, _) => {
            let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;
            days.i32()?
                .into_iter()
                .map(|d| d.and_then(from_epoch_days))
                .collect()
        }
        _ => {
            let text = column.cast(&DataType::String)?;
            let values = text.str()?;
            let parsed: Vec<Option<NaiveDate>> = values
                .into_iter()
                .map(|v| v.and_then(|s| parser.parse(s)))
                .collect();
            let failures = values
                .into_iter()
                .zip(&parsed)
                .filter(|(raw, date)| raw.is_some_and(|s| !s.trim().is_empty()) && date.is_none())
                .count();
            if failures > 0 {
                log::warn!(
                    "{} values in `{}` could not be parsed as dates and were set to null",
                    failures,
                    column.name()
                );
            }
            parsed
        }
    };
    Ok(parsed)
}

fn date_column(name: &str, dates: &[Option<NaiveDate>]) -> PolarsResult<Column> {
    let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(to_epoch_days)).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{record, sample_frame};

    #[test]
    fn derives_year_and_month_from_event_date() {
        let raw = sample_frame(&[
            record(20, "F", "2018-05-14"),
            record(25, "M", "not a date"),
            record(30, "F", "2020-12-01 08:00:00"),
        ]);
        let table = normalize(&raw, &NormalizeOptions::default()).unwrap();
        let df = table.dataframe();

        assert_eq!(
            int_values(df, columns::YEAR_OF_EVENT).unwrap(),
            vec![Some(2018), None, Some(2020)]
        );
        assert_eq!(
            int_values(df, columns::MONTH_OF_EVENT).unwrap(),
            vec![Some(5), None, Some(12)]
        );
        assert_eq!(df.column(columns::EVENT_DATE).unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column(columns::EVENT_DATE).unwrap().null_count(), 1);
    }

    #[test]
    fn typed_date_columns_are_converted_not_reparsed() {
        let mut raw = sample_frame(&[
            record(20, "F", ""),
            record(25, "F", ""),
            record(30, "F", ""),
        ]);
        let event_days: Vec<Option<i32>> = vec![
            Some(to_epoch_days(NaiveDate::from_ymd_opt(2017, 9, 3).unwrap())),
            None,
            Some(to_epoch_days(NaiveDate::from_ymd_opt(2021, 1, 31).unwrap())),
        ];
        raw.with_column(
            Column::new(columns::EVENT_DATE.into(), event_days)
                .cast(&DataType::Date)
                .unwrap(),
        )
        .unwrap();
        // 1990-06-15 12:30 UTC, null, 1985-02-01 00:00 UTC
        let dob_millis: Vec<Option<i64>> = vec![Some(645_453_000_000), None, Some(476_064_000_000)];
        raw.with_column(
            Column::new("dob".into(), dob_millis)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
                .unwrap(),
        )
        .unwrap();

        let table = normalize(&raw, &NormalizeOptions::default()).unwrap();
        let df = table.dataframe();

        assert_eq!(
            int_values(df, columns::YEAR_OF_EVENT).unwrap(),
            vec![Some(2017), None, Some(2021)]
        );
        assert_eq!(
            int_values(df, columns::MONTH_OF_EVENT).unwrap(),
            vec![Some(9), None, Some(1)]
        );
        assert_eq!(df.column(columns::EVENT_DATE).unwrap().null_count(), 1);

        let dob = df.column("dob").unwrap();
        assert_eq!(dob.dtype(), &DataType::Date);
        assert_eq!(dob.null_count(), 1);
        let dob_days: Vec<Option<i32>> = dob.cast(&DataType::Int32).unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(
            dob_days,
            vec![
                Some(to_epoch_days(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap())),
                None,
                Some(to_epoch_days(NaiveDate::from_ymd_opt(1985, 2, 1).unwrap())),
            ]
        );
    }

    #[test]
    fn text_columns_become_categorical_with_observed_domain() {
        let raw = sample_frame(&[
            record(20, "M", "2018-05-14"),
            record(25, "F", "2019-05-14"),
            record(30, "M", "2020-05-14"),
        ]);
        let table = normalize(&raw, &NormalizeOptions::default()).unwrap();

        assert!(matches!(
            table.dataframe().column(columns::GENDER).unwrap().dtype(),
            DataType::Categorical(_, _)
        ));
        assert_eq!(
            table.categories(columns::GENDER),
            Some(&["F".to_string(), "M".to_string()][..])
        );
        assert_eq!(table.gender_domain().unwrap(), vec!["F", "M"]);
        assert!(table.categories(columns::AGE).is_none());
    }

    #[test]
    fn optional_date_fields_are_parsed_and_index_dropped() {
        let mut raw = sample_frame(&[record(20, "F", "2018-05-14"), record(22, "F", "2018-06-14")]);
        raw.with_column(Column::new("Unnamed: 0".into(), [0i64, 1])).unwrap();
        raw.with_column(Column::new("dob".into(), ["1998-01-02", "garbage"]))
            .unwrap();

        let table = normalize(&raw, &NormalizeOptions::default()).unwrap();
        let df = table.dataframe();

        assert!(df.get_column_index("Unnamed: 0").is_none());
        assert_eq!(df.column("dob").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("dob").unwrap().null_count(), 1);
        // the raw frame keeps its original shape
        assert!(raw.get_column_index("Unnamed: 0").is_some());
        assert_eq!(raw.column("dob").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn missing_event_date_is_a_schema_error() {
        let raw = sample_frame(&[record(20, "F", "2018-05-14")])
            .drop(columns::EVENT_DATE)
            .unwrap();

        let err = normalize(&raw, &NormalizeOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(ref c) if c == columns::EVENT_DATE));
    }

    #[test]
    fn bounds_reflect_observed_values() {
        let raw = sample_frame(&[
            record(19, "F", "2015-01-01"),
            record(44, "F", "bad"),
            record(31, "M", "2021-07-30"),
        ]);
        let table = normalize(&raw, &NormalizeOptions::default()).unwrap();

        assert_eq!(table.age_bounds().unwrap(), Some((19, 44)));
        assert_eq!(table.year_bounds().unwrap(), Some((2015, 2021)));
    }
}
