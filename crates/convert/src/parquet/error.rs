//! Error types for Parquet writing.

/// Errors that can occur while building or writing a Parquet file.
#[derive(Debug, thiserror::Error)]
pub enum ParquetError {
    /// Failed to build Arrow arrays from frame data.
    #[error("Arrow conversion error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Failed to write Parquet file.
    #[error("Parquet write error: {0}")]
    Write(#[from] parquet::errors::ParquetError),

    /// I/O error when creating, writing or renaming the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
