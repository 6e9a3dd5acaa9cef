//! In-memory table: named, equally long columns plus the key columns.

use std::collections::HashSet;

use chrono::DateTime;

use crate::error::ConvertError;

/// Typed column values. `None` is the null marker for every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    /// Naive milliseconds since the Unix epoch.
    Timestamp(Vec<Option<i64>>),
}

impl ColumnData {
    /// Pick the narrowest type every non-null value fits, the way a dataframe
    /// reader infers CSV columns. An all-null column comes out as Float64.
    pub fn infer(values: Vec<Option<String>>) -> ColumnData {
        let mut present = values.iter().flatten().peekable();
        if present.peek().is_none() {
            return ColumnData::Float64(vec![None; values.len()]);
        }

        if values.iter().flatten().all(|v| v.parse::<i64>().is_ok()) {
            return ColumnData::Int64(
                values.iter().map(|v| v.as_deref().and_then(|s| s.parse().ok())).collect(),
            );
        }
        if values.iter().flatten().all(|v| v.parse::<f64>().is_ok()) {
            return ColumnData::Float64(
                values.iter().map(|v| v.as_deref().and_then(|s| s.parse().ok())).collect(),
            );
        }
        if values.iter().flatten().all(|v| parse_bool(v).is_some()) {
            return ColumnData::Boolean(
                values.iter().map(|v| v.as_deref().and_then(parse_bool)).collect(),
            );
        }
        ColumnData::Text(values)
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Int64(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Float64(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Boolean(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Timestamp(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Text(_) => "text",
            ColumnData::Int64(_) => "int64",
            ColumnData::Float64(_) => "float64",
            ColumnData::Boolean(_) => "boolean",
            ColumnData::Timestamp(_) => "timestamp",
        }
    }

    /// Render the value at `row` as text; `None` for null or out of range.
    pub fn text_at(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Text(v) => v.get(row)?.clone(),
            ColumnData::Int64(v) => v.get(row)?.map(|x| x.to_string()),
            ColumnData::Float64(v) => v.get(row)?.map(|x| x.to_string()),
            ColumnData::Boolean(v) => v.get(row)?.map(|x| (if x { "True" } else { "False" }).to_string()),
            ColumnData::Timestamp(v) => v.get(row)?.and_then(format_timestamp_ms),
        }
    }

    /// Text rendering of every value.
    pub fn to_text(&self) -> Vec<Option<String>> {
        match self {
            ColumnData::Text(v) => v.clone(),
            other => (0..other.len()).map(|row| other.text_at(row)).collect(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

fn format_timestamp_ms(ms: i64) -> Option<String> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self { name: name.into(), data }
    }
}

/// One table between reading and writing.
#[derive(Debug, Clone)]
pub struct Frame {
    table: String,
    columns: Vec<Column>,
    index: Vec<String>,
    rows: usize,
}

impl Frame {
    pub fn new(table: impl Into<String>, columns: Vec<Column>) -> Result<Self, ConvertError> {
        let table = table.into();
        let rows = columns.first().map(|c| c.data.len()).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ConvertError::DuplicateColumn {
                    table,
                    column: column.name.clone(),
                });
            }
            if column.data.len() != rows {
                return Err(ConvertError::LengthMismatch {
                    table,
                    column: column.name.clone(),
                    expected: rows,
                    actual: column.data.len(),
                });
            }
        }

        Ok(Self {
            table,
            columns,
            index: Vec::new(),
            rows,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Key columns, in declared order.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Frame::column`], but a missing column is an error naming the table.
    pub fn require(&self, name: &str) -> Result<&Column, ConvertError> {
        self.column(name).ok_or_else(|| self.missing(name))
    }

    /// Declare the key columns and move them to the front of the frame.
    /// Keys are not required to be unique; the number of rows repeating an
    /// earlier key is returned.
    pub fn set_index(&mut self, keys: &[&str]) -> Result<usize, ConvertError> {
        let mut front = Vec::with_capacity(keys.len());
        for key in keys {
            let pos = self
                .columns
                .iter()
                .position(|c| c.name == *key)
                .ok_or_else(|| self.missing(key))?;
            front.push(self.columns.remove(pos));
        }
        front.append(&mut self.columns);
        self.columns = front;
        self.index = keys.iter().map(|k| k.to_string()).collect();

        Ok(self.duplicate_keys())
    }

    fn duplicate_keys(&self) -> usize {
        if self.index.is_empty() {
            return 0;
        }
        let key_columns = &self.columns[..self.index.len()];
        let mut seen = HashSet::with_capacity(self.rows);
        let mut duplicates = 0;
        for row in 0..self.rows {
            let key: Vec<Option<String>> = key_columns.iter().map(|c| c.data.text_at(row)).collect();
            if !seen.insert(key) {
                duplicates += 1;
            }
        }
        duplicates
    }

    /// Remove the named columns. Every name must exist.
    pub fn drop_columns(&mut self, names: &[&str]) -> Result<(), ConvertError> {
        if let Some(missing) = names.iter().find(|n| self.column(n).is_none()) {
            return Err(self.missing(missing));
        }
        self.columns.retain(|c| !names.contains(&c.name.as_str()));
        self.index.retain(|k| !names.contains(&k.as_str()));
        Ok(())
    }

    /// Replace the column of the same name in place, or append it.
    pub fn put_column(&mut self, column: Column) -> Result<(), ConvertError> {
        if column.data.len() != self.rows && !self.columns.is_empty() {
            return Err(ConvertError::LengthMismatch {
                table: self.table.clone(),
                column: column.name,
                expected: self.rows,
                actual: column.data.len(),
            });
        }
        if self.columns.is_empty() {
            self.rows = column.data.len();
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => existing.data = column.data,
            None => self.columns.push(column),
        }
        Ok(())
    }

    fn missing(&self, column: &str) -> ConvertError {
        ConvertError::MissingColumn {
            table: self.table.clone(),
            column: column.to_string(),
        }
    }
}
