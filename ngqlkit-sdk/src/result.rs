//! Result sets and typed decoding
//!
//! A [`ResultSet`] is the neutral output of an [`Executor`](crate::Executor):
//! column names plus rows of JSON values. Converting the database's wire
//! format into it is the executor's job; decoding rows into caller types is
//! done here through serde.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Columns and rows returned by one statement
///
/// # Examples
///
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct EdgeCount {
///     e: String,
///     cnt: i64,
/// }
///
/// let counts: Vec<EdgeCount> = result.decode_rows()?;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        ResultSet { columns, rows }
    }

    /// Result of a statement that yields nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, by name
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// A row as a JSON object keyed by column name
    pub fn row_object(&self, index: usize) -> Option<serde_json::Map<String, serde_json::Value>> {
        self.rows.get(index).map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
    }

    /// Decode every row, each as an object keyed by column name
    pub fn decode_rows<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        (0..self.rows.len())
            .map(|index| self.decode_row(index))
            .collect()
    }

    /// Decode one column of every row
    pub fn decode_column<T: DeserializeOwned>(&self, column: &str) -> Result<Vec<T>> {
        let index = self.require_column(column)?;
        self.rows
            .iter()
            .map(|row| decode_cell(row, index, column))
            .collect()
    }

    /// Decode the first row
    pub fn first<T: DeserializeOwned>(&self) -> Result<T> {
        if self.rows.is_empty() {
            return Err(Error::RecordNotFound);
        }
        self.decode_row(0)
    }

    /// Decode one column of the first row
    pub fn first_column<T: DeserializeOwned>(&self, column: &str) -> Result<T> {
        let index = self.require_column(column)?;
        let row = self.rows.first().ok_or(Error::RecordNotFound)?;
        decode_cell(row, index, column)
    }

    fn decode_row<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let object = self
            .row_object(index)
            .ok_or_else(|| Error::Decode(format!("row {} out of range", index)))?;
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| Error::Decode(format!("row {}: {}", index, e)))
    }

    fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column).ok_or_else(|| {
            Error::Decode(format!(
                "column `{}` not found in [{}]",
                column,
                self.columns.join(", ")
            ))
        })
    }
}

fn decode_cell<T: DeserializeOwned>(row: &[serde_json::Value], index: usize, column: &str) -> Result<T> {
    let value = row.get(index).cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(|e| Error::Decode(format!("column `{}`: {}", column, e)))
}
