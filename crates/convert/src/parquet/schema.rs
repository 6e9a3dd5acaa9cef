//! Column type to Arrow type mapping and schema construction.

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};

use crate::frame::{ColumnData, Frame};

/// Arrow type for a column. Timestamps are naive (no time zone).
pub(crate) fn arrow_type(data: &ColumnData) -> DataType {
    match data {
        ColumnData::Text(_) => DataType::Utf8,
        ColumnData::Int64(_) => DataType::Int64,
        ColumnData::Float64(_) => DataType::Float64,
        ColumnData::Boolean(_) => DataType::Boolean,
        ColumnData::Timestamp(_) => DataType::Timestamp(TimeUnit::Millisecond, None),
    }
}

/// Build an Arrow [`Schema`] with one nullable field per frame column.
pub(crate) fn build_schema(frame: &Frame) -> Schema {
    let fields: Vec<Field> = frame
        .columns()
        .iter()
        .map(|col| Field::new(&col.name, arrow_type(&col.data), true))
        .collect();
    Schema::new(fields)
}
