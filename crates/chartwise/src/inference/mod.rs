//! Schema inference for loosely typed rows.

mod column_types;

pub use column_types::{classify_value, TypeInferencer, TypeVote, ValueKind};
