//! Dataset representation: ordered rows plus an ordered schema.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::column::ColumnMeta;
use super::types::ColumnType;

/// A row: ordered mapping from column name to cell.
///
/// Rows need not share identical keys. Reading a key the row lacks yields
/// [`Cell::Null`].
pub type Row = IndexMap<String, Cell>;

static NULL_CELL: Cell = Cell::Null;

/// Rows paired with their inferred columns.
///
/// Datasets are treated as immutable values: every transformation in this
/// crate returns a new dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Rows in display order.
    pub rows: Vec<Row>,
    /// Columns in first-seen order.
    pub columns: Vec<ColumnMeta>,
}

impl Dataset {
    /// Create a dataset from rows and an already-built schema.
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnMeta>) -> Self {
        Self { rows, columns }
    }

    /// Create a dataset that shares this dataset's schema but holds other rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            rows,
            columns: self.columns.clone(),
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check whether the schema contains a column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Find columns with a specific type.
    pub fn columns_of_type(&self, column_type: ColumnType) -> impl Iterator<Item = &ColumnMeta> {
        self.columns
            .iter()
            .filter(move |c| c.column_type == column_type)
    }

    /// Get a cell, reading absent keys as null.
    pub fn cell(&self, row: usize, column: &str) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Iterate over every cell of a column, absent keys read as null.
    pub fn column_cells<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Cell> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&NULL_CELL))
    }

    /// Collect the numeric values of a column from the first `limit` rows
    /// (all rows when `None`), skipping cells that do not parse.
    pub fn numeric_values(&self, column: &str, limit: Option<usize>) -> Vec<f64> {
        let limit = limit.unwrap_or(self.rows.len());
        self.column_cells(column)
            .take(limit)
            .filter_map(Cell::as_f64)
            .collect()
    }

    /// Count missing cells of a row over the schema columns.
    pub fn missing_in_row(&self, row: &Row) -> usize {
        self.columns
            .iter()
            .filter(|c| row.get(&c.name).is_none_or(Cell::is_missing))
            .count()
    }
}

/// Canonical signature of a row, used for duplicate detection.
///
/// Entries are ordered by key so two rows with the same content compare equal
/// regardless of key order. Cells keep their variant, so `1` and `"1"` differ.
pub fn row_signature(row: &Row) -> String {
    let sorted: BTreeMap<&str, &Cell> = row.iter().map(|(k, v)| (k.as_str(), v)).collect();
    // A string-keyed map of cells has no failing serialization path.
    serde_json::to_string(&sorted).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(pairs: &[(&str, Cell)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_absent_cells_read_as_null() {
        let dataset = Dataset::new(
            vec![make_row(&[("a", Cell::from(1))]), make_row(&[("b", Cell::from(2))])],
            vec![
                ColumnMeta::new("a", ColumnType::Number),
                ColumnMeta::new("b", ColumnType::Number),
            ],
        );

        assert_eq!(dataset.cell(0, "b"), &Cell::Null);
        assert_eq!(dataset.cell(5, "a"), &Cell::Null);
        assert_eq!(dataset.numeric_values("a", None), vec![1.0]);
        assert_eq!(dataset.missing_in_row(&dataset.rows[0]), 1);
    }

    #[test]
    fn test_signature_ignores_key_order() {
        let a = make_row(&[("x", Cell::from(1)), ("y", Cell::from("b"))]);
        let b = make_row(&[("y", Cell::from("b")), ("x", Cell::from(1))]);
        assert_eq!(row_signature(&a), row_signature(&b));
    }

    #[test]
    fn test_signature_keeps_cell_variant() {
        let a = make_row(&[("x", Cell::from(1))]);
        let b = make_row(&[("x", Cell::from("1"))]);
        assert_ne!(row_signature(&a), row_signature(&b));
    }

    #[test]
    fn test_numeric_values_respects_limit() {
        let rows = (0..10).map(|i| make_row(&[("v", Cell::from(i))])).collect();
        let dataset = Dataset::new(rows, vec![ColumnMeta::new("v", ColumnType::Number)]);
        assert_eq!(dataset.numeric_values("v", Some(3)), vec![0.0, 1.0, 2.0]);
    }
}
