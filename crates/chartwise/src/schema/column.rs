//! Column metadata.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Name and inferred type of a dataset column.
///
/// The type is a majority vote over a bounded sample, not a guarantee that
/// every value in the column parses as that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name, unique within a dataset.
    pub name: String,
    /// Inferred logical type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnMeta {
    /// Create column metadata.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}
