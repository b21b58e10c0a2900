//! Schema types for representing datasets and their inferred structure.

mod cell;
mod column;
mod dataset;
mod types;

pub use cell::{parse_number, Cell};
pub use column::ColumnMeta;
pub use dataset::{row_signature, Dataset, Row};
pub use types::ColumnType;
