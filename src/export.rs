//! Summary Export Module
//! Writes the current selection and its chart aggregates as pretty JSON.

use crate::data::FilterParams;
use crate::stats::DashboardAggregates;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write summary: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    filters: &'a FilterParams,
    aggregates: &'a DashboardAggregates,
}

pub struct SummaryExporter;

impl SummaryExporter {
    pub fn write_summary(
        path: &Path,
        filters: &FilterParams,
        aggregates: &DashboardAggregates,
    ) -> Result<(), ExportError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(
            &mut writer,
            &SummaryDocument {
                filters,
                aggregates,
            },
        )?;
        writer.flush()?;
        log::info!("Summary exported to {}", path.display());
        Ok(())
    }
}
