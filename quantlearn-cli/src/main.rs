//! QuantLearn CLI: fit estimators on a CSV price file and export the results.
//!
//! Commands:
//! - `run`: fit every configured estimator and write series, signals and plots
//! - `events`: print the buy/sell crossings of a moving average crossover

mod export;
mod load;
mod logging;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quantlearn_core::{AnyEstimator, CrossoverParams, CrossoverSignalModel, Estimator, RunConfig};
use rayon::prelude::*;
use tracing::info;

use crate::export::{save_artifacts, unique_labels, Summary};
use crate::load::load_csv;

#[derive(Parser)]
#[command(
    name = "quantlearn",
    about = "QuantLearn CLI: technical indicators and signal models on price series"
)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the configured estimators and export their outputs.
    Run {
        /// CSV price file. Overrides `data.path` from the config.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Path to a TOML config file. Defaults to RSI(14) plus a 50/200 crossover.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Date column name. Overrides `data.date_column` from the config.
        #[arg(long)]
        date_column: Option<String>,

        /// Output directory for CSV and JSON artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Print crossover buy/sell events as JSON lines.
    Events {
        /// CSV price file.
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value_t = 50)]
        short_window: usize,

        #[arg(long, default_value_t = 200)]
        long_window: usize,

        /// Price column the moving averages are computed on.
        #[arg(long, default_value = "close")]
        column: String,

        #[arg(long, default_value = "date")]
        date_column: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Run {
            input,
            config,
            date_column,
            output_dir,
        } => run_estimators(input, config, date_column, output_dir),
        Commands::Events {
            input,
            short_window,
            long_window,
            column,
            date_column,
        } => print_events(input, short_window, long_window, column, &date_column),
    }
}

fn run_estimators(
    input: Option<PathBuf>,
    config_path: Option<PathBuf>,
    date_column: Option<String>,
    output_dir: PathBuf,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    let Some(input) = input.or_else(|| config.data.path.clone()) else {
        bail!("no input file: pass --input or set data.path in the config");
    };
    let date_column = date_column.unwrap_or_else(|| config.data.date_column.clone());

    let data = load_csv(&input, &date_column)?;
    let frame = &data.frame;
    info!(
        path = %input.display(),
        rows = frame.len(),
        columns = frame.columns().len(),
        "loaded price data"
    );

    let estimators = config.build()?;
    let labels = unique_labels(&estimators.iter().map(AnyEstimator::label).collect::<Vec<_>>());

    let summaries: Vec<Result<Summary>> = estimators
        .into_par_iter()
        .zip(labels)
        .map(|(mut estimator, label)| {
            if let Err(err) = estimator.fit(frame) {
                return Err(data.explain_fit_error(err))
                    .with_context(|| format!("failed to fit {label}"));
            }
            let summary = save_artifacts(&estimator, frame, &label, &output_dir)?;
            info!(estimator = %label, files = summary.files.len(), "wrote artifacts");
            Ok(summary)
        })
        .collect();

    println!();
    println!("=== QuantLearn Run ===");
    println!("Input:   {}", input.display());
    println!(
        "Period:  {} to {} ({} bars)",
        frame.index().first().map(|d| d.to_string()).unwrap_or_default(),
        frame.index().last().map(|d| d.to_string()).unwrap_or_default(),
        frame.len()
    );
    println!("Output:  {}", output_dir.display());
    println!();
    for summary in summaries {
        println!("{}", summary?);
    }
    println!();
    Ok(())
}

fn print_events(
    input: PathBuf,
    short_window: usize,
    long_window: usize,
    column: String,
    date_column: &str,
) -> Result<()> {
    let model = CrossoverSignalModel::new(CrossoverParams {
        column,
        ..CrossoverParams::with_windows(short_window, long_window)
    })?;
    let mut estimator = Estimator::new(model);

    let data = load_csv(&input, date_column)?;
    if let Err(err) = estimator.fit(&data.frame) {
        return Err(data.explain_fit_error(err));
    }

    let events = estimator.events()?;
    info!(count = events.len(), "detected crossover events");
    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}
