//! CLI argument definitions using clap.

use std::path::PathBuf;

use chartwise::{CleaningOperation, FillStrategy};
use clap::{Parser, Subcommand};

/// Chartwise: schema inference, data quality and chart suggestions
#[derive(Parser)]
#[command(name = "chartwise")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with configuration overrides
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the inferred schema, statistics and quick insights
    Analyze {
        /// Path to the data file (CSV/TSV/PSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank chart suggestions for a data file
    Suggest {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of suggestions to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a chart spec as JSON
    Chart {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chart type (line, bar, pie, scatter, area, radar, heatmap, treemap, funnel, gauge)
        #[arg(short = 't', long = "type")]
        chart_type: String,

        /// X column; treemaps take comma-separated columns
        #[arg(short, long)]
        x: String,

        /// Y column; radar charts take comma-separated columns
        #[arg(short, long, default_value = "")]
        y: String,

        /// Heatmap value column (cells count rows without it)
        #[arg(long)]
        value: Option<String>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Use the smaller preview sample
        #[arg(long)]
        preview: bool,

        /// Write the spec to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply one cleaning operation and export the result
    Clean {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Operation (deduplicate, fill-default, fill-mean, fill-median, drop-incomplete, remove-outliers)
        #[arg(long)]
        op: CleanOpChoice,

        /// Missing-cell fraction above which drop-incomplete removes a row
        #[arg(long)]
        threshold: Option<f64>,

        /// Output path (default: <file>_cleaned.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },
}

/// Cleaning operation choice.
#[derive(Clone, Debug)]
pub enum CleanOpChoice {
    Deduplicate,
    Fill(FillStrategy),
    DropIncomplete,
    RemoveOutliers,
}

impl CleanOpChoice {
    /// Resolve to a library operation, using `threshold` for drop-incomplete.
    pub fn into_operation(self, threshold: f64) -> CleaningOperation {
        match self {
            CleanOpChoice::Deduplicate => CleaningOperation::Deduplicate,
            CleanOpChoice::Fill(strategy) => CleaningOperation::FillMissing { strategy },
            CleanOpChoice::DropIncomplete => CleaningOperation::DropIncomplete { threshold },
            CleanOpChoice::RemoveOutliers => CleaningOperation::RemoveOutliers,
        }
    }
}

impl std::str::FromStr for CleanOpChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "deduplicate" | "dedupe" => Ok(CleanOpChoice::Deduplicate),
            "fill" | "fill-default" => Ok(CleanOpChoice::Fill(FillStrategy::Default)),
            "fill-mean" => Ok(CleanOpChoice::Fill(FillStrategy::Mean)),
            "fill-median" => Ok(CleanOpChoice::Fill(FillStrategy::Median)),
            "drop-incomplete" => Ok(CleanOpChoice::DropIncomplete),
            "remove-outliers" => Ok(CleanOpChoice::RemoveOutliers),
            _ => Err(format!(
                "Unknown operation: {}. Use deduplicate, fill-default, fill-mean, fill-median, drop-incomplete, or remove-outliers.",
                s
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown format: {}. Use csv or tsv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_op_names() {
        assert!(matches!(
            "fill_median".parse::<CleanOpChoice>(),
            Ok(CleanOpChoice::Fill(FillStrategy::Median))
        ));
        assert!(matches!(
            "Drop-Incomplete".parse::<CleanOpChoice>(),
            Ok(CleanOpChoice::DropIncomplete)
        ));
        assert!("shuffle".parse::<CleanOpChoice>().is_err());
    }

    #[test]
    fn test_drop_incomplete_takes_threshold() {
        let op = CleanOpChoice::DropIncomplete.into_operation(0.25);
        assert_eq!(op, CleaningOperation::DropIncomplete { threshold: 0.25 });
    }

    #[test]
    fn test_cli_parses_chart_command() {
        let cli = Cli::try_parse_from([
            "chartwise", "chart", "data.csv", "--type", "bar", "-x", "region", "-y", "sales",
            "--preview", "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Chart {
                chart_type,
                x,
                y,
                preview,
                ..
            } => {
                assert_eq!(chart_type, "bar");
                assert_eq!(x, "region");
                assert_eq!(y, "sales");
                assert!(preview);
            }
            _ => panic!("expected chart command"),
        }
    }
}
