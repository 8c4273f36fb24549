//! Typed column extraction.
//! Pulls a column out of a frame as plain Rust values, whatever its physical dtype.

use polars::prelude::*;

/// Integer view of a column. Floats are truncated, NaN becomes null.
pub fn int_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().collect())
}

/// Float view of a column with NaN folded into null.
pub fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Display label of every cell; categorical, boolean and numeric columns alike.
/// Booleans read as `True`/`False`, the way the source file spells them.
pub fn label_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    if column.dtype() == &DataType::Boolean {
        return Ok(column
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| if b { "True" } else { "False" }.to_string()))
            .collect());
    }
    let column = column.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Min and max over the non-null values.
pub fn min_max<T: PartialOrd + Copy>(values: &[Option<T>]) -> Option<(T, T)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((
            if v < lo { v } else { lo },
            if v > hi { v } else { hi },
        )),
    })
}
