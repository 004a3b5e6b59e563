//! Main entry point for the scale-tune tool.
//!
//! Parses CLI arguments, initializes logging, and dispatches to one of
//! the two pipelines: the filter parameter search (`tune`) or the
//! calibration factor calculator (`calibrate`).

use anyhow::{Context, Result};
use scale_tune::calibration::CalibrationFactor;
use scale_tune::cli::{CalibrateArgs, Cli, Command, TuneArgs};
use scale_tune::config::AppConfig;
use scale_tune::ingest::{ValidityWindow, load_readings};
use scale_tune::report::{self, TuningSummary};
use scale_tune::search::grid_search;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.to_filter_string()),
    )
    .init();

    match cli.command {
        Command::Tune(args) => run_tune(args),
        Command::Calibrate(args) => run_calibrate(args),
    }
}

fn run_tune(args: TuneArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.apply_cli_overrides(&args);
    config.validate()?;

    let window = ValidityWindow::new(config.window.lower, config.window.upper);
    let measurements = load_readings(&args.readings, &window)
        .with_context(|| format!("ingesting {}", args.readings.display()))?;
    log::info!(
        "Loaded {} valid readings from {}",
        measurements.len(),
        args.readings.display()
    );

    let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
    let outcome = grid_search(
        &values,
        &config.grid.p0.values(),
        &config.grid.q.values(),
        &config.grid.r.values(),
        config.initial_estimate,
    )?;

    let summary = TuningSummary::from_outcome(&outcome, values.len());
    match &args.summary_out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            report::write_summary(file, &summary)?;
        }
        None => report::write_summary(std::io::stdout().lock(), &summary)?,
    }

    if let Some(path) = &args.predicted_out {
        let file =
            std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_predicted(file, &measurements, &outcome.best.predicted)?;
        log::info!("Wrote smoothed series to {}", path.display());
    }

    Ok(())
}

fn run_calibrate(args: CalibrateArgs) -> Result<()> {
    let factor = CalibrationFactor::compute(args.known_weight, args.reference_reading)?;
    factor.save(&args.out)?;

    log::info!("Calibration successful: factor {factor}");
    println!("{factor}");
    Ok(())
}
