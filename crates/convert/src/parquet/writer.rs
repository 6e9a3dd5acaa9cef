//! Public API for writing frames to Parquet.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;
use tracing::debug;

use crate::frame::Frame;
use super::builders::build_arrays;
use super::error::ParquetError;
use super::schema::build_schema;

/// Metadata key holding the table name.
pub const TABLE_KEY: &str = "paddock.table";
/// Metadata key holding the comma separated key columns.
pub const INDEX_KEY: &str = "paddock.index_columns";
/// Metadata key holding the source CSV file name.
pub const SOURCE_KEY: &str = "paddock.source";

/// Convert a [`Frame`] into an Arrow [`RecordBatch`].
pub fn frame_to_record_batch(frame: &Frame) -> Result<RecordBatch, ParquetError> {
    let schema = Arc::new(build_schema(frame));
    let arrays = build_arrays(frame);
    let batch = RecordBatch::try_new(schema, arrays)?;
    Ok(batch)
}

/// Write a [`Frame`] to a Parquet file at `path`, returning the row count.
///
/// The file is written as `<path>.tmp` and renamed into place once closed,
/// so `path` only ever holds a complete file.
pub fn write_parquet(frame: &Frame, path: &Path, source: &str) -> Result<u64, ParquetError> {
    let batch = frame_to_record_batch(frame)?;
    let row_count = batch.num_rows() as u64;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_path(path);
    let file = fs::File::create(&tmp)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(Default::default()))
        .set_key_value_metadata(Some(vec![
            KeyValue::new(TABLE_KEY.to_string(), Some(frame.table().to_string())),
            KeyValue::new(INDEX_KEY.to_string(), Some(frame.index().join(","))),
            KeyValue::new(SOURCE_KEY.to_string(), Some(source.to_string())),
        ]))
        .build();

    let written = ArrowWriter::try_new(file, batch.schema(), Some(props)).and_then(|mut writer| {
        writer.write(&batch)?;
        writer.close()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path)?;

    debug!(
        path = %path.display(),
        rows = row_count,
        table = frame.table(),
        "Wrote Parquet file"
    );

    Ok(row_count)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
