//! CSV loading with dataframe-style missing values and type inference.

use std::path::Path;

use tracing::debug;

use crate::error::ConvertError;
use crate::frame::{Column, ColumnData, Frame};

/// Tokens read as null. The dataset's own `\N` marker is not one of them.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

/// Read `path` into a [`Frame`] named `table`, inferring each column's type.
pub fn read_csv(path: &Path, table: &str) -> Result<Frame, ConvertError> {
    if !path.is_file() {
        return Err(ConvertError::MissingRawData {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)?;
    read_from(&mut reader, table)
}

pub(crate) fn read_from<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    table: &str,
) -> Result<Frame, ConvertError> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record = record?;
        for (slot, field) in values.iter_mut().zip(record.iter()) {
            slot.push(if is_na(field) { None } else { Some(field.to_string()) });
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(values)
        .map(|(name, raw)| Column::new(name, ColumnData::infer(raw)))
        .collect();
    let frame = Frame::new(table, columns)?;

    debug!(
        table,
        rows = frame.num_rows(),
        columns = frame.num_columns(),
        "Read CSV"
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(body: &str) -> Result<Frame, ConvertError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(body.as_bytes());
        read_from(&mut reader, "drivers")
    }

    #[test]
    fn infers_types_per_column() {
        let frame = read_str(
            "driverId,driverRef,number,code\n\
             1,hamilton,44,HAM\n\
             2,heidfeld,\\N,HEI\n",
        )
        .unwrap();

        assert_eq!(frame.num_rows(), 2);
        assert_eq!(frame.require("driverId").unwrap().data, ColumnData::Int64(vec![Some(1), Some(2)]));
        // `\N` is not a missing-value token, so the column stays textual.
        assert_eq!(frame.require("number").unwrap().data.type_name(), "text");
        assert_eq!(frame.require("code").unwrap().data.type_name(), "text");
    }

    #[test]
    fn na_tokens_become_null() {
        let frame = read_str("a,b\n1,NA\n2,\n3,2.5\n").unwrap();
        assert_eq!(frame.require("b").unwrap().data, ColumnData::Float64(vec![None, None, Some(2.5)]));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let frame = read_str("constructorId,name\n1,\"Williams, Grand Prix\"\n").unwrap();
        assert_eq!(
            frame.require("name").unwrap().data.text_at(0).as_deref(),
            Some("Williams, Grand Prix")
        );
    }

    #[test]
    fn ragged_row_is_an_error() {
        let err = read_str("a,b\n1,2\n3\n").unwrap_err();
        assert!(matches!(err, ConvertError::Csv(_)));
    }

    #[test]
    fn duplicate_header_is_an_error() {
        let err = read_str("a,a\n1,2\n").unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateColumn { .. }));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let frame = read_str("statusId,status\n").unwrap();
        assert_eq!(frame.num_rows(), 0);
        assert_eq!(frame.column_names(), vec!["statusId", "status"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("status.csv");
        let err = read_csv(&path, "status").unwrap_err();
        assert!(matches!(err, ConvertError::MissingRawData { path: ref p } if *p == path));
    }
}
