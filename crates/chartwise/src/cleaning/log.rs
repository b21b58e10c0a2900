//! Record of cleaning operations applied in a session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operations::{CleaningOperation, CleaningOutcome};

/// One applied cleaning operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningLogEntry {
    pub operation: CleaningOperation,
    pub description: String,
    pub affected: usize,
    /// When the operation was applied.
    pub at: DateTime<Utc>,
}

/// Ordered history of cleaning operations for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningLog {
    entries: Vec<CleaningLogEntry>,
}

impl CleaningLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for an outcome and return it.
    pub fn record(&mut self, outcome: &CleaningOutcome) -> &CleaningLogEntry {
        self.entries.push(CleaningLogEntry {
            operation: outcome.operation.clone(),
            description: outcome.operation.description(),
            affected: outcome.affected,
            at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[CleaningLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total rows or cells touched across all entries.
    pub fn total_affected(&self) -> usize {
        self.entries.iter().map(|e| e.affected).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
