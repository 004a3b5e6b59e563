//! Batch smoothing of load-cell readings with a scalar Kalman filter,
//! plus grid search over the filter's parameters and a calibration
//! factor calculator for the scale itself.

pub mod calibration;
pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod ingest;
pub mod report;
pub mod search;

pub use calibration::CalibrationFactor;
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use filters::{KalmanParams, ScalarKalman, smooth};
pub use ingest::{Measurement, ValidityWindow, load_readings};
pub use search::{ParamRange, SearchOutcome, Trial, grid_search};
