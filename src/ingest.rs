//! Ingestion of persisted load-cell readings.
//!
//! The scale logger appends one record per line, `index,value`, with
//! optional whitespace around the fields and no header row. A record that
//! does not parse as two numeric fields aborts ingestion: a partially
//! parsed run is not worth drawing conclusions from.

use crate::error::IngestError;
use std::io;
use std::path::Path;

/// One raw reading as persisted by the acquisition side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Acquisition counter; defines evaluation order
    pub index: u64,
    /// Raw load-cell value, in ADC counts
    pub value: f64,
}

/// Inclusive range of plausible raw values
#[derive(Debug, Clone, Copy)]
pub struct ValidityWindow {
    pub lower: f64,
    pub upper: f64,
}

impl ValidityWindow {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Parse `index,value` records from a reader, in input order.
pub fn read_measurements<R: io::Read>(reader: R) -> Result<Vec<Measurement>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut measurements = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(|e| IngestError::ParseError {
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(measurements.len() + 1),
            content: String::new(),
            reason: e.to_string(),
        })?;

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(measurements.len() + 1);
        let content = record.iter().collect::<Vec<_>>().join(",");

        let malformed = |reason: &str| IngestError::ParseError {
            line,
            content: content.clone(),
            reason: reason.to_string(),
        };

        if record.len() != 2 {
            return Err(malformed("expected exactly two fields"));
        }

        let index: u64 = record[0]
            .parse()
            .map_err(|_| malformed("index is not an integer"))?;
        let value: f64 = record[1]
            .parse()
            .map_err(|_| malformed("value is not a number"))?;

        measurements.push(Measurement { index, value });
    }

    Ok(measurements)
}

/// Drop readings outside the window, keeping the survivors in input order.
///
/// Out-of-range values are discarded, never clamped: a clamped sample would
/// silently change the error surface of the parameter search.
pub fn filter_window(measurements: Vec<Measurement>, window: &ValidityWindow) -> Vec<Measurement> {
    let before = measurements.len();
    let kept: Vec<Measurement> = measurements
        .into_iter()
        .filter(|m| window.contains(m.value))
        .collect();

    if kept.len() < before {
        log::info!(
            "Validity window [{}, {}] dropped {} of {} readings",
            window.lower,
            window.upper,
            before - kept.len(),
            before
        );
    }

    kept
}

/// Read a readings file and apply the validity window in one step.
pub fn load_readings<P: AsRef<Path>>(
    path: P,
    window: &ValidityWindow,
) -> Result<Vec<Measurement>, IngestError> {
    let file = std::fs::File::open(path.as_ref())?;
    let measurements = read_measurements(io::BufReader::new(file))?;
    Ok(filter_window(measurements, window))
}
