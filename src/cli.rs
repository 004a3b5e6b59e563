//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure and parsing logic using clap,
//! with one subcommand per pipeline: `tune` runs the filter parameter
//! search over a captured readings file, `calibrate` derives a scale
//! calibration factor from a reference measurement.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Show all messages including trace
    Trace,
    /// Show debug messages and above
    Debug,
    /// Show info messages and above (default)
    Info,
    /// Show warnings and errors only
    Warn,
    /// Show errors only
    Error,
}

impl LogLevel {
    /// Convert LogLevel to env_logger filter string
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// scale-tune: smooth load-cell readings and tune the filter doing it
#[derive(Parser, Debug)]
#[command(name = "scale-tune")]
#[command(version)]
#[command(about = "Smooths load-cell readings and grid-searches Kalman parameters", long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(short, long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the parameter grid search over a captured readings file
    Tune(TuneArgs),
    /// Compute a calibration factor from a reference measurement
    Calibrate(CalibrateArgs),
}

#[derive(clap::Args, Debug)]
pub struct TuneArgs {
    /// Path to the captured readings file (one `index,value` record per line)
    #[arg(short, long, default_value = "readings.txt")]
    pub readings: PathBuf,

    /// Path to configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the JSON tuning summary here instead of stdout
    #[arg(long)]
    pub summary_out: Option<PathBuf>,

    /// Write the smoothed series as `index,raw,predicted` CSV rows
    #[arg(long)]
    pub predicted_out: Option<PathBuf>,

    /// Validity window lower bound (overrides config file)
    #[arg(long)]
    pub window_lower: Option<f64>,

    /// Validity window upper bound (overrides config file)
    #[arg(long)]
    pub window_upper: Option<f64>,

    /// Initial state estimate for every filter run (overrides config file)
    #[arg(long)]
    pub initial_estimate: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct CalibrateArgs {
    /// Weight of the reference object, in grams
    #[arg(short, long)]
    pub known_weight: f64,

    /// Net raw reading taken with the reference object on the scale
    #[arg(short, long)]
    pub reference_reading: f64,

    /// File the factor is written to, as plain decimal text
    #[arg(short, long, default_value = "calibration_factor.txt")]
    pub out: PathBuf,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
