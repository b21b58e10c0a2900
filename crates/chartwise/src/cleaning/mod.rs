//! Dataset cleaning.
//!
//! Each operation is a pure transformation returning a new dataset and the
//! number of rows or cells it touched. A [`CleaningLog`] keeps the history
//! for display.

mod log;
mod operations;
mod pipeline;

pub use log::{CleaningLog, CleaningLogEntry};
pub use operations::{CleaningOperation, CleaningOutcome, FillStrategy};
pub use pipeline::{CleaningPipeline, TEXT_PLACEHOLDER};
