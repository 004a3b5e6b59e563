//! Application configuration management.
//!
//! This module handles loading, parsing, and validating the application
//! configuration from TOML files with support for runtime overrides from
//! CLI arguments. The grid ranges and validity window are configuration
//! rather than constants: the shipped defaults were tuned against one
//! particular HX711 load cell and are not universal.

use crate::error::{ConfigError, Result};
use crate::search::ParamRange;
use serde::Deserialize;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub grid: GridConfig,
    /// Starting state estimate for every filter run, in raw counts
    pub initial_estimate: f64,
}

/// Validity window applied to raw readings before filtering
#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub lower: f64,
    pub upper: f64,
}

/// Candidate ranges for the three Kalman parameters
#[derive(Debug, Deserialize, Clone)]
pub struct GridConfig {
    #[serde(default = "default_p0_range")]
    pub p0: ParamRange,
    #[serde(default = "default_q_range")]
    pub q: ParamRange,
    #[serde(default = "default_r_range")]
    pub r: ParamRange,
}

// Default value functions
fn default_p0_range() -> ParamRange {
    ParamRange::new(1.0, 100_000.0, 10)
}

fn default_q_range() -> ParamRange {
    ParamRange::new(1e-12, 1e-10, 10)
}

fn default_r_range() -> ParamRange {
    ParamRange::new(1e-2, 100.0, 10)
}

fn default_initial_estimate() -> f64 {
    24_000.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lower: 10_000.0,
            upper: 30_000.0,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            p0: default_p0_range(),
            q: default_q_range(),
            r: default_r_range(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            grid: GridConfig::default(),
            initial_estimate: default_initial_estimate(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadError)?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.window.lower > self.window.upper {
            return Err(ConfigError::InvalidValue {
                field: "window".to_string(),
                message: "lower bound exceeds upper bound".to_string(),
            }
            .into());
        }

        for (name, range) in [
            ("grid.p0", &self.grid.p0),
            ("grid.q", &self.grid.q),
            ("grid.r", &self.grid.r),
        ] {
            if range.count == 0 {
                return Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    message: "count must be at least 1".to_string(),
                }
                .into());
            }
            if range.start <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    message: "candidates must be strictly positive".to_string(),
                }
                .into());
            }
            if range.start > range.end {
                return Err(ConfigError::InvalidValue {
                    field: name.to_string(),
                    message: "start exceeds end".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, args: &crate::cli::TuneArgs) {
        if let Some(lower) = args.window_lower {
            self.window.lower = lower;
        }

        if let Some(upper) = args.window_upper {
            self.window.upper = upper;
        }

        if let Some(estimate) = args.initial_estimate {
            self.initial_estimate = estimate;
        }
    }
}
