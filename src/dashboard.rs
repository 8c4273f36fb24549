//! Dashboard pipeline: load once, then filter + aggregate on every selection change.

use crate::data::{
    filter, normalize, DataLoader, FilterError, FilterParams, FilteredTable, LoaderError,
    NormalizeOptions, NormalizedTable, SchemaError,
};
use crate::stats::DashboardAggregates;
use polars::prelude::PolarsError;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] PolarsError),
}

/// Result of one recomputation: the selection, its rows and its chart data.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub params: FilterParams,
    pub filtered: FilteredTable,
    pub aggregates: DashboardAggregates,
}

/// Read and normalize the dataset.
pub fn load_dataset(
    loader: &mut DataLoader,
    path: &Path,
    options: &NormalizeOptions,
) -> Result<NormalizedTable, DashboardError> {
    let raw = loader.load_csv(path)?;
    let table = normalize(&raw, options)?;
    if let Some(source) = loader.get_file_path() {
        log::info!("Dataset ready from {} ({} records)", source.display(), table.height());
    }
    Ok(table)
}

/// Filter the table with `params` and rebuild every aggregate from scratch.
pub fn recompute(table: &NormalizedTable, params: &FilterParams) -> Result<DashboardView, DashboardError> {
    let start = Instant::now();
    let filtered = filter(table, params)?;
    let aggregates = DashboardAggregates::compute(&filtered)?;
    log::debug!(
        "Recomputed {} records (age {}-{}, year {}-{}, {} genders) in {:?}",
        filtered.height(),
        params.age.min,
        params.age.max,
        params.year.min,
        params.year.max,
        params.genders.len(),
        start.elapsed()
    );
    Ok(DashboardView {
        params: params.clone(),
        filtered,
        aggregates,
    })
}
