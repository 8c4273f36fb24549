//! Data module - CSV loading, normalization and filtering

pub mod columns;
mod dates;
mod filter;
mod loader;
mod normalizer;
pub mod values;

#[cfg(test)]
pub(crate) mod fixtures;

pub use dates::DateParser;
pub use filter::{filter, FilterError, FilterParams, FilteredTable, InclusiveRange};
pub use loader::{DataLoader, LoaderError};
pub use normalizer::{normalize, NormalizeOptions, NormalizedTable, SchemaError};
