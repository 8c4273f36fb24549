//! Filter Module
//! Applies the sidebar selection (age range, year range, genders) to the normalized table.

use crate::data::columns;
use crate::data::normalizer::NormalizedTable;
use crate::data::values::{float_values, int_values, label_values};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InclusiveRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> InclusiveRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Null never falls inside a range.
    pub fn contains(&self, value: Option<T>) -> bool {
        value.is_some_and(|v| self.min <= v && v <= self.max)
    }
}

impl InclusiveRange<i64> {
    /// Whole-number bounds against a fractional value, without truncating it.
    pub fn contains_real(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| self.min as f64 <= v && v <= self.max as f64)
    }
}

/// One snapshot of the sidebar filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub age: InclusiveRange<i64>,
    pub year: InclusiveRange<i64>,
    /// Accepted gender labels; empty selects nothing
    pub genders: BTreeSet<String>,
}

impl FilterParams {
    /// Full observed ranges and every observed gender.
    ///
    /// A table without any age (or event year) yields the empty `[0, 0]`
    /// range for it, which only matches a literal zero.
    pub fn unrestricted(table: &NormalizedTable) -> Result<Self, FilterError> {
        let (age_min, age_max) = table.age_bounds()?.unwrap_or((0, 0));
        let (year_min, year_max) = table.year_bounds()?.unwrap_or((0, 0));
        Ok(Self {
            age: InclusiveRange::new(age_min, age_max),
            year: InclusiveRange::new(year_min, year_max),
            genders: table.gender_domain()?.into_iter().collect(),
        })
    }
}

/// Rows of the normalized table that pass the current filters, in table order.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    df: DataFrame,
}

impl FilteredTable {
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}

/// Keep the rows whose age, event year and gender all satisfy `params`.
pub fn filter(table: &NormalizedTable, params: &FilterParams) -> Result<FilteredTable, FilterError> {
    let df = table.dataframe();
    let ages = float_values(df, columns::AGE)?;
    let years = int_values(df, columns::YEAR_OF_EVENT)?;
    let genders = label_values(df, columns::GENDER)?;

    let mask: BooleanChunked = ages
        .iter()
        .zip(&years)
        .zip(&genders)
        .map(|((&age, &year), gender)| {
            params.age.contains_real(age)
                && params.year.contains(year)
                && gender.as_ref().is_some_and(|g| params.genders.contains(g))
        })
        .collect();

    let df = df.filter(&mask)?;
    log::debug!("Filter kept {} of {} rows", df.height(), table.height());
    Ok(FilteredTable { df })
}
