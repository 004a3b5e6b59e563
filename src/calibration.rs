//! Calibration factor for converting raw counts to physical weight.
//!
//! The factor is derived from a single reference measurement of an object
//! of known weight: `factor = known_weight / net_raw_reading`, where the
//! net reading comes from an external zeroing procedure. It is persisted
//! as one plain decimal number so the acquisition side can pick it up with
//! a bare parse.

use crate::error::CalibrationError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Scale factor applied to raw readings: `weight = raw * factor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationFactor {
    value: f64,
}

impl CalibrationFactor {
    /// Derive the factor from one reference measurement.
    pub fn compute(known_weight: f64, reference_reading: f64) -> Result<Self, CalibrationError> {
        if reference_reading == 0.0 {
            return Err(CalibrationError::DivisionByZero);
        }

        Ok(Self {
            value: known_weight / reference_reading,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Apply the factor to a raw reading.
    pub fn apply(&self, raw_reading: f64) -> f64 {
        raw_reading * self.value
    }

    /// Persist the factor as plain decimal text.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CalibrationError> {
        std::fs::write(path.as_ref(), self.to_string())?;
        Ok(())
    }

    /// Read a factor previously written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CalibrationError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        content.parse()
    }
}

impl fmt::Display for CalibrationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for CalibrationFactor {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse()
            .map_err(|_| CalibrationError::InvalidCalibrationFile {
                content: s.to_string(),
            })?;
        Ok(Self { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_factor() {
        let factor = CalibrationFactor::compute(500.0, 1000.0).unwrap();
        assert_eq!(factor.value(), 0.5);
    }

    #[test]
    fn test_zero_reference_is_rejected() {
        let err = CalibrationFactor::compute(10.0, 0.0).unwrap_err();
        assert!(matches!(err, CalibrationError::DivisionByZero));
    }

    #[test]
    fn test_apply_scales_raw_reading() {
        let factor = CalibrationFactor::compute(500.0, 1000.0).unwrap();
        assert_eq!(factor.apply(24_000.0), 12_000.0);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibration_factor.txt");

        let factor = CalibrationFactor::compute(500.0, 1024.0).unwrap();
        factor.save(&path).unwrap();

        let restored = CalibrationFactor::load(&path).unwrap();
        assert_eq!(restored, factor);
    }

    #[test]
    fn test_invalid_file_content() {
        let err = "not a number".parse::<CalibrationFactor>().unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InvalidCalibrationFile { .. }
        ));
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let factor: CalibrationFactor = "0.48828125\n".parse().unwrap();
        assert_eq!(factor.value(), 0.48828125);
    }
}
