//! Chartwise CLI - dataset analysis and chart recommendation.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(logging::LogConfig::from_verbose(cli.verbose));

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Analyze { file, json } => commands::analyze::run(file, json, config, cli.verbose),

        Commands::Suggest { file, limit, json } => {
            commands::suggest::run(file, limit, json, config, cli.verbose)
        }

        Commands::Chart {
            file,
            chart_type,
            x,
            y,
            value,
            title,
            preview,
            output,
        } => {
            let mut request = chartwise::ChartRequest::new(chart_type, x, y);
            request.value_column = value;
            request.title = title;
            commands::chart::run(file, request, preview, output, config)
        }

        Commands::Clean {
            file,
            op,
            threshold,
            output,
            format,
        } => commands::clean::run(file, op, threshold, output, format, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
