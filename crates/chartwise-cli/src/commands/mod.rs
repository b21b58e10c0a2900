//! CLI command implementations.

pub mod analyze;
pub mod chart;
pub mod clean;
pub mod suggest;

use std::path::Path;

use chartwise::{Chartwise, ChartwiseConfig};

/// Build the engine, applying `--config` overrides when given.
pub fn engine(config: Option<&Path>) -> Result<Chartwise, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => ChartwiseConfig::from_json_file(path)?,
        None => ChartwiseConfig::default(),
    };
    Ok(Chartwise::with_config(config))
}

/// Fail early with a readable message for a missing input file.
pub fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
