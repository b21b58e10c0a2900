//! Clean command - apply one cleaning operation and export the result.

use std::path::{Path, PathBuf};

use chartwise::{CleaningLog, Dataset};
use colored::Colorize;

use super::{engine, require_file};
use crate::cli::{CleanOpChoice, OutputFormat};

pub fn run(
    file: PathBuf,
    op: CleanOpChoice,
    threshold: Option<f64>,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let chartwise = engine(config)?;
    let result = chartwise.analyze_file(&file)?;

    let threshold = threshold.unwrap_or(chartwise.config().cleaning.incomplete_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(format!("Threshold must be within 0..=1, got {}", threshold).into());
    }

    let operation = op.into_operation(threshold);
    let outcome = chartwise.clean(&result.dataset, &operation);

    let mut log = CleaningLog::new();
    let entry = log.record(&outcome);
    println!(
        "{} {} ({} {})",
        "Applied".cyan().bold(),
        entry.description,
        entry.affected.to_string().white().bold(),
        if outcome.is_noop() { "changes, nothing to do" } else { "affected" }
    );

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}_cleaned.{}", stem, format))
    });

    write_delimited(&outcome.dataset, &output_path, format)?;

    println!(
        "{} {} rows to {}",
        "Saved".green().bold(),
        outcome.dataset.row_count(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// Write the dataset as delimited text, columns in schema order.
fn write_delimited(
    dataset: &Dataset,
    path: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_path(path)?;

    writer.write_record(dataset.column_names())?;
    for index in 0..dataset.row_count() {
        let record: Vec<String> = dataset
            .columns
            .iter()
            .map(|column| dataset.cell(index, &column.name).to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(())
}
