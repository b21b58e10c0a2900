//! Suggest command - ranked chart suggestions.

use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{engine, require_file};

pub fn run(
    file: PathBuf,
    limit: Option<usize>,
    json_output: bool,
    config: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let chartwise = engine(config)?;
    let result = chartwise.analyze_file(&file)?;

    let mut suggestions = result.suggestions;
    if let Some(limit) = limit {
        suggestions.truncate(limit);
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("{}", "No chart suggestions for this data.".yellow());
        return Ok(());
    }

    println!(
        "{} {} suggestions for {}",
        "Found".cyan().bold(),
        suggestions.len().to_string().white().bold(),
        file.display().to_string().white()
    );
    println!();

    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!(
            "{:>3}. {:8} {}",
            rank + 1,
            suggestion.chart_type.as_str().green(),
            suggestion.title.white().bold()
        );
        println!(
            "     x: {}  y: {}",
            suggestion.x_column,
            suggestion.y_column()
        );
        if verbose {
            println!(
                "     {} (rule {}, priority {})",
                suggestion.description, suggestion.rule, suggestion.priority
            );
        }
    }

    println!();
    if let Some(top) = suggestions.first() {
        println!(
            "Run {} to render the top suggestion",
            format!(
                "chartwise chart {} --type {} -x '{}' -y '{}'",
                file.display(),
                top.chart_type,
                top.x_column,
                top.y_column()
            )
            .cyan()
        );
    }

    Ok(())
}
