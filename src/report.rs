//! Reporting of tuning results for external consumers.
//!
//! The summary (best parameter triple and its error) goes out as JSON; the
//! smoothed series goes out as `index,raw,predicted` CSV rows for whatever
//! plotting tool sits downstream.

use crate::error::Result;
use crate::filters::KalmanParams;
use crate::ingest::Measurement;
use crate::search::SearchOutcome;
use serde::Serialize;
use std::io::Write;

/// Best parameters found by the grid search, plus context for the run
#[derive(Debug, Clone, Serialize)]
pub struct TuningSummary {
    pub best_params: KalmanParams,
    pub mean_squared_error: f64,
    /// Number of measurements the search was run over
    pub samples: usize,
    /// Number of grid points that produced a valid filter run
    pub grid_points_evaluated: usize,
}

impl TuningSummary {
    pub fn from_outcome(outcome: &SearchOutcome, samples: usize) -> Self {
        Self {
            best_params: outcome.best.params,
            mean_squared_error: outcome.best.mse,
            samples,
            grid_points_evaluated: outcome.evaluated.len(),
        }
    }
}

/// Write the tuning summary as pretty-printed JSON.
pub fn write_summary<W: Write>(mut writer: W, summary: &TuningSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary).map_err(anyhow::Error::from)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the smoothed series next to the raw one, one CSV row per sample.
///
/// `predicted` must be the filter output for `measurements`, so the two
/// sequences pair up index for index.
pub fn write_predicted<W: Write>(
    writer: W,
    measurements: &[Measurement],
    predicted: &[f64],
) -> Result<()> {
    debug_assert_eq!(measurements.len(), predicted.len());

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["index", "raw", "predicted"])
        .map_err(anyhow::Error::from)?;

    for (measurement, estimate) in measurements.iter().zip(predicted) {
        csv_writer
            .write_record([
                measurement.index.to_string(),
                measurement.value.to_string(),
                estimate.to_string(),
            ])
            .map_err(anyhow::Error::from)?;
    }

    csv_writer.flush().map_err(anyhow::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Trial;

    fn outcome() -> SearchOutcome {
        let params = KalmanParams::new(100.0, 1e-11, 1.0);
        SearchOutcome {
            best: Trial {
                params,
                predicted: vec![24_005.0, 23_999.0],
                mse: 42.5,
            },
            evaluated: vec![(params, 42.5)],
        }
    }

    #[test]
    fn test_summary_json_fields() {
        let summary = TuningSummary::from_outcome(&outcome(), 2);
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["best_params"]["p0"], 100.0);
        assert_eq!(json["best_params"]["r"], 1.0);
        assert_eq!(json["mean_squared_error"], 42.5);
        assert_eq!(json["samples"], 2);
    }

    #[test]
    fn test_predicted_csv_rows() {
        let measurements = vec![
            Measurement {
                index: 0,
                value: 24_010.0,
            },
            Measurement {
                index: 3,
                value: 24_005.0,
            },
        ];
        let predicted = vec![24_004.9, 24_004.95];

        let mut buf = Vec::new();
        write_predicted(&mut buf, &measurements, &predicted).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("index,raw,predicted"));
        assert_eq!(lines.next(), Some("0,24010,24004.9"));
        assert_eq!(lines.next(), Some("3,24005,24004.95"));
    }
}
