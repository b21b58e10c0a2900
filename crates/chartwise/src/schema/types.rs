//! Core type definitions for schema representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric values (integers and decimals).
    Number,
    /// Free text or anything that did not win the type vote.
    String,
    /// Calendar dates in one of the recognized layouts.
    Date,
    /// Boolean literals, including localized yes/no tokens.
    Boolean,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date)
    }

    /// Returns true if the column can act as a category axis.
    ///
    /// Dates count as categories: a chart over distinct dates is still a
    /// comparison across discrete labels.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnType::String | ColumnType::Date)
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::String
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
