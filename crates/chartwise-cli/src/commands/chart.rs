//! Chart command - build a chart spec from a request.

use std::fs;
use std::path::{Path, PathBuf};

use chartwise::ChartRequest;
use colored::Colorize;

use super::{engine, require_file};

pub fn run(
    file: PathBuf,
    request: ChartRequest,
    preview: bool,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let chartwise = engine(config)?;
    let result = chartwise.analyze_file(&file)?;

    let spec = if preview {
        chartwise.preview_chart(&request, &result.dataset)
    } else {
        chartwise.chart(&request, &result.dataset)
    };

    if spec.is_empty() {
        eprintln!(
            "{} No series produced for {} chart of {} / {}; check the column names.",
            "Warning:".yellow().bold(),
            request.chart_type,
            request.x_column,
            request.y_column
        );
    }

    let json = serde_json::to_string_pretty(&spec)?;
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
