//! Build typed Arrow arrays from frame columns.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder,
    TimestampMillisecondBuilder,
};

use crate::frame::{ColumnData, Frame};

pub(crate) fn build_arrays(frame: &Frame) -> Vec<ArrayRef> {
    frame.columns().iter().map(|col| build_array(&col.data)).collect()
}

fn build_array(data: &ColumnData) -> ArrayRef {
    match data {
        ColumnData::Int64(values) => {
            let mut builder = Int64Builder::with_capacity(values.len());
            builder.extend(values.iter().copied());
            Arc::new(builder.finish())
        }
        ColumnData::Float64(values) => {
            let mut builder = Float64Builder::with_capacity(values.len());
            builder.extend(values.iter().copied());
            Arc::new(builder.finish())
        }
        ColumnData::Boolean(values) => {
            let mut builder = BooleanBuilder::with_capacity(values.len());
            builder.extend(values.iter().copied());
            Arc::new(builder.finish())
        }
        ColumnData::Timestamp(values) => {
            let mut builder = TimestampMillisecondBuilder::with_capacity(values.len());
            builder.extend(values.iter().copied());
            Arc::new(builder.finish())
        }
        ColumnData::Text(values) => {
            let bytes = values.iter().flatten().map(String::len).sum();
            let mut builder = StringBuilder::with_capacity(values.len(), bytes);
            for value in values {
                match value {
                    Some(s) => builder.append_value(s),
                    None => builder.append_null(),
                }
            }
            Arc::new(builder.finish())
        }
    }
}
