//! Analyze command - schema, statistics, profiles and quick insights.

use std::path::{Path, PathBuf};

use chartwise::quality::InsightKind;
use colored::Colorize;

use super::{engine, require_file};

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let chartwise = engine(config)?;
    let result = chartwise.analyze_file(&file)?;

    if json_output {
        // Rows are left out; the schema and summaries describe them.
        let report = serde_json::json!({
            "source": result.source,
            "columns": result.dataset.columns,
            "statistics": result.statistics,
            "profiles": result.profiles,
            "insights": result.insights,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );
    if let Some(source) = &result.source {
        println!(
            "Format: {} ({}), {} rows x {} columns",
            source.format, source.encoding, source.row_count, source.column_count
        );
    }
    println!();

    println!("{}", "Schema:".yellow().bold());
    for profile in &result.profiles {
        let mut line = format!(
            "  {:20} {:8} missing {:<6} distinct {:<6}",
            profile.name,
            profile.column_type.label(),
            profile.missing,
            profile.distinct
        );
        if let (Some(mean), Some(min), Some(max)) = (profile.mean, profile.min, profile.max) {
            line.push_str(&format!(" mean {:.2} range {}..{}", mean, min, max));
        }
        if verbose {
            if let Some(outliers) = profile.outliers {
                line.push_str(&format!(" outliers {}", outliers));
            }
        }
        println!("{}", line);
    }
    println!();

    let stats = &result.statistics;
    println!("{}", "Statistics:".yellow().bold());
    println!(
        "  Columns: {} numeric, {} text, {} date, {} boolean",
        stats.numeric_columns, stats.string_columns, stats.date_columns, stats.boolean_columns
    );
    println!(
        "  Missing: {} of {} cells ({:.1}%)",
        stats.missing_values.to_string().white().bold(),
        stats.total_cells(),
        stats.missing_percent()
    );
    println!("  Duplicates: {}", stats.duplicate_rows.to_string().white().bold());
    println!();

    println!("{}", "Insights:".yellow().bold());
    for insight in &result.insights {
        let title = match insight.kind {
            InsightKind::Info => insight.title.blue(),
            InsightKind::Warning => insight.title.yellow(),
            InsightKind::Success => insight.title.green(),
        };
        println!("  {}: {}", title, insight.description);
    }

    if !result.suggestions.is_empty() {
        println!();
        println!(
            "{} chart suggestions available. Run {} to see them.",
            result.suggestions.len().to_string().white().bold(),
            format!("chartwise suggest {}", file.display()).cyan()
        );
    }

    Ok(())
}
