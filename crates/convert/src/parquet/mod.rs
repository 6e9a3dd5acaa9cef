//! Write converted [`Frame`](crate::frame::Frame)s to Apache Parquet files.
//!
//! Each column keeps the type it ended up with after cleaning, so readers
//! get real integers, floats and timestamps instead of strings. Files are
//! Zstd compressed and carry the table name, key columns and source CSV as
//! key-value metadata.

mod error;
pub(crate) mod schema;
pub(crate) mod builders;
mod writer;


pub use error::ParquetError;
pub use writer::{frame_to_record_batch, write_parquet, INDEX_KEY, SOURCE_KEY, TABLE_KEY};
