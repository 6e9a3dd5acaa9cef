//! Transformation stage: read the raw CSVs, clean them per the table
//! catalogue and write one Parquet file per table into the converted
//! sentinel directory.

pub mod coerce;
pub mod error;
pub mod frame;
pub mod parquet;
pub mod reader;
pub mod tables;

use std::fs;
use std::path::Path;

use paddock_core::config::PathsConfig;
use paddock_core::Sentinel;
use serde::Serialize;
use tracing::info;

pub use error::ConvertError;
pub use frame::{Column, ColumnData, Frame};
pub use tables::{Step, TableSpec, TABLES};

/// What happened to one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    pub rows: usize,
    pub columns: usize,
    pub duplicate_keys: usize,
    pub coerced_nulls: usize,
    /// Size of the written Parquet file.
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The converted directory already existed; nothing was written.
    Skipped,
    Converted(Vec<TableReport>),
}

/// Convert every catalogued table unless the converted directory exists.
///
/// Tables are written into a staging directory that only becomes the
/// converted directory once all of them succeeded.
pub fn convert_all(paths: &PathsConfig) -> Result<ConvertOutcome, ConvertError> {
    let sentinel = Sentinel::new(&paths.parquet_dir);
    if sentinel.is_present() {
        info!("Parquet data already available at {}", sentinel.path().display());
        return Ok(ConvertOutcome::Skipped);
    }
    if !paths.raw_dir.is_dir() {
        return Err(ConvertError::MissingRawData {
            path: paths.raw_dir.clone(),
        });
    }

    info!("Generating parquet data...");
    let staging = sentinel.begin()?;
    let mut reports = Vec::with_capacity(TABLES.len());
    for spec in TABLES {
        match convert_table(spec, &paths.raw_dir, &staging) {
            Ok(report) => reports.push(report),
            Err(e) => {
                sentinel.abandon();
                return Err(e);
            }
        }
    }
    sentinel.commit()?;

    info!(
        "Parquet data written: {} tables in {}",
        reports.len(),
        sentinel.path().display()
    );
    Ok(ConvertOutcome::Converted(reports))
}

/// Read, clean and write a single table.
pub fn convert_table(spec: &TableSpec, raw_dir: &Path, out_dir: &Path) -> Result<TableReport, ConvertError> {
    let source = spec.source_file();
    let mut frame = reader::read_csv(&raw_dir.join(&source), spec.name)?;

    let mut stats = tables::StepStats::default();
    let duplicate_keys = spec.apply(&mut frame, &mut stats)?;

    let out_path = out_dir.join(spec.output_file());
    parquet::write_parquet(&frame, &out_path, &source)?;
    let bytes = fs::metadata(&out_path)?.len();

    info!(
        table = spec.name,
        rows = frame.num_rows(),
        columns = frame.num_columns(),
        bytes,
        "Converted table"
    );

    Ok(TableReport {
        table: spec.name.to_string(),
        rows: frame.num_rows(),
        columns: frame.num_columns(),
        duplicate_keys,
        coerced_nulls: stats.coerced_nulls,
        bytes,
    })
}
