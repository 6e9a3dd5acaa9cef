use std::path::PathBuf;

use thiserror::Error;

use crate::parquet::ParquetError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] paddock_core::CoreError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("raw data directory {} does not exist", .path.display())]
    MissingRawData { path: PathBuf },

    #[error("{table}: column `{column}` not found")]
    MissingColumn { table: String, column: String },

    #[error("{table}: column `{column}` appears more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("{table}: column `{column}` has {actual} rows, expected {expected}")]
    LengthMismatch {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),
}
