// src/main.rs

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use clap::{Parser, ValueHint};
use tracing_subscriber::EnvFilter;

use powerlog_plot::data_input::timezone::{parse_timezone, system_timezone};
use powerlog_plot::{plot_power_log, MeasurementType, PlotError, PlotRequest, ScalePolicy, Source};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate a plot from an ODROID PowerMate CSV log file",
    long_about = None
)]
struct Cli {
    /// Path to the input CSV log file
    #[arg(value_hint = ValueHint::FilePath)]
    input_csv: PathBuf,

    /// Path to save the output plot image (e.g. plot.png, plot.svg)
    #[arg(value_hint = ValueHint::FilePath)]
    output_image: PathBuf,

    /// Panels to generate, top to bottom
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        num_args = 0..,
        default_values_t = MeasurementType::ALL.to_vec()
    )]
    types: Vec<MeasurementType>,

    /// Sources drawn in every panel, in legend order
    #[arg(
        short = 's',
        long = "source",
        value_enum,
        num_args = 1..,
        default_values_t = Source::ALL.to_vec()
    )]
    sources: Vec<Source>,

    /// Display timezone (IANA name); defaults to the system timezone
    #[arg(long, value_parser = parse_timezone)]
    timezone: Option<Tz>,

    /// What to do when data exceeds the largest scale step
    #[arg(long, value_enum, default_value_t = ScalePolicy::Clip)]
    scale_policy: ScalePolicy,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("could not initialise logging: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    let display_tz = cli.timezone.unwrap_or_else(system_timezone);
    let request = PlotRequest::new(cli.input_csv, cli.output_image, display_tz)
        .with_types(&cli.types)
        .with_sources(&cli.sources)
        .with_scale_policy(cli.scale_policy);

    match plot_power_log(&request) {
        Ok(_) => ExitCode::SUCCESS,
        Err(PlotError::EmptySelection) => {
            eprintln!("No plot types selected. Nothing to do.");
            ExitCode::from(PlotError::EmptySelection.exit_code())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
