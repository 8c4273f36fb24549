//! CSV Data Loader Module
//! Reads the source table using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV {path}: {source}")]
    CsvError { path: PathBuf, source: PolarsError },
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),
}

/// Reads the dataset once and remembers where it came from.
pub struct DataLoader {
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { file_path: None }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }
        self.file_path = Some(file_path.to_path_buf());

        let start = Instant::now();
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::CsvError {
                path: file_path.to_path_buf(),
                source,
            })?;

        log::info!(
            "Loaded {} rows x {} columns from {} in {:?}",
            df.height(),
            df.width(),
            file_path.display(),
            start.elapsed()
        );
        Ok(df)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
