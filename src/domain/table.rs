//! Sanitized tabular data
//!
//! Everything that flows toward a spreadsheet destination passes through
//! [`TableData`]: every value is already text and absent values are already
//! empty strings, so the remote API never sees a payload it could reject on
//! type grounds.

/// A fully materialized, text-sanitized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    /// Column names, in source order
    pub columns: Vec<String>,

    /// Data rows; each row has exactly `columns.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Create a new table from column names and stringified rows
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Render the table as the cell grid to write: header row first,
    /// then every data row.
    pub fn to_values(&self) -> Vec<Vec<String>> {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.columns.clone());
        values.extend(self.rows.iter().cloned());
        values
    }
}
