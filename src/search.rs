//! Grid search over Kalman filter parameters.
//!
//! Enumerates the full Cartesian product of three candidate ranges (P0
//! outer, Q middle, R inner), runs one filter pass per triple and keeps the
//! combination with the lowest mean squared error against the raw readings.
//! Enumeration order is fixed, and the first triple to reach the minimum
//! wins ties, so the result is reproducible bit for bit.

use crate::error::{FilterError, SearchError};
use crate::filters::{KalmanParams, smooth};
use serde::{Deserialize, Serialize};

/// `count` evenly spaced candidate values from `start` to `end` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl ParamRange {
    pub fn new(start: f64, end: f64, count: usize) -> Self {
        Self { start, end, count }
    }

    /// Materialize the candidates in ascending order.
    pub fn values(&self) -> Vec<f64> {
        if self.count <= 1 {
            return vec![self.start; self.count];
        }

        let step = (self.end - self.start) / (self.count - 1) as f64;
        (0..self.count)
            .map(|i| self.start + step * i as f64)
            .collect()
    }
}

/// One evaluated grid point
#[derive(Debug, Clone)]
pub struct Trial {
    pub params: KalmanParams,
    /// Smoothed estimate per input measurement, in input order
    pub predicted: Vec<f64>,
    pub mse: f64,
}

/// Result of a completed grid search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The minimal-error trial, including its full predicted sequence
    pub best: Trial,
    /// Error of every grid point that produced a valid run, in
    /// enumeration order, kept for diagnostics
    pub evaluated: Vec<(KalmanParams, f64)>,
}

/// Mean squared error between paired sequences of equal, nonzero length.
fn mean_squared_error(measurements: &[f64], predicted: &[f64]) -> f64 {
    let sum: f64 = measurements
        .iter()
        .zip(predicted)
        .map(|(z, x)| (z - x) * (z - x))
        .sum();
    sum / measurements.len() as f64
}

/// Search the full `p0 × q × r` grid for the minimal-error parameter triple.
///
/// Preconditions are checked before any trial runs. A grid point whose
/// filter run fails with [`FilterError::DegenerateParameters`] is excluded
/// from the minimum rather than aborting the search; the remaining points
/// are independent of it.
pub fn grid_search(
    measurements: &[f64],
    p0_candidates: &[f64],
    q_candidates: &[f64],
    r_candidates: &[f64],
    initial_estimate: f64,
) -> Result<SearchOutcome, SearchError> {
    if measurements.is_empty() {
        return Err(SearchError::InsufficientData);
    }
    for (axis, candidates) in [
        ("p0", p0_candidates),
        ("q", q_candidates),
        ("r", r_candidates),
    ] {
        if candidates.is_empty() {
            return Err(SearchError::EmptySearchSpace { axis });
        }
    }

    let grid = p0_candidates.iter().flat_map(|&p0| {
        q_candidates.iter().flat_map(move |&q| {
            r_candidates
                .iter()
                .map(move |&r| KalmanParams::new(p0, q, r))
        })
    });

    let mut evaluated =
        Vec::with_capacity(p0_candidates.len() * q_candidates.len() * r_candidates.len());
    let mut best: Option<Trial> = None;

    for params in grid {
        let predicted = match smooth(measurements, params, initial_estimate) {
            Ok(predicted) => predicted,
            Err(FilterError::DegenerateParameters) => {
                log::debug!("Skipping degenerate grid point {params:?}");
                continue;
            }
        };

        let mse = mean_squared_error(measurements, &predicted);
        evaluated.push((params, mse));

        // Strict `<` keeps the earlier triple on ties
        if best.as_ref().is_none_or(|b| mse < b.mse) {
            best = Some(Trial {
                params,
                predicted,
                mse,
            });
        }
    }

    let best = best.ok_or(SearchError::NoValidTrial)?;
    log::info!(
        "Grid search evaluated {} points; best mse {:.6} at {:?}",
        evaluated.len(),
        best.mse,
        best.params
    );

    Ok(SearchOutcome { best, evaluated })
}
