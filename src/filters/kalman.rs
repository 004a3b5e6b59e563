//! Scalar Kalman filter over a batch of readings.
//!
//! The state is a single value under a random-walk model: the prediction
//! step carries the previous estimate forward and inflates the covariance
//! by the process variance. One smoothed estimate is emitted per input
//! measurement, in a single forward pass.

use crate::error::FilterError;
use serde::{Deserialize, Serialize};

/// The three tunable filter parameters, fixed for the duration of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanParams {
    /// Initial error covariance (P0)
    pub p0: f64,
    /// Process variance (Q); larger tracks new measurements more aggressively
    pub q: f64,
    /// Measurement variance (R); larger trusts the sensor less
    pub r: f64,
}

impl KalmanParams {
    pub fn new(p0: f64, q: f64, r: f64) -> Self {
        Self { p0, q, r }
    }
}

/// One filter run's private state
#[derive(Debug, Clone)]
pub struct ScalarKalman {
    params: KalmanParams,
    estimate: f64,
    covariance: f64,
}

impl ScalarKalman {
    /// Create a filter run starting from `initial_estimate`.
    ///
    /// A non-positive measurement variance makes the gain denominator
    /// reachable at zero, so it is rejected up front.
    pub fn new(params: KalmanParams, initial_estimate: f64) -> Result<Self, FilterError> {
        if params.r <= 0.0 {
            return Err(FilterError::DegenerateParameters);
        }

        Ok(Self {
            estimate: initial_estimate,
            covariance: params.p0,
            params,
        })
    }

    /// Advance the filter by one measurement and return the corrected estimate.
    pub fn update(&mut self, measurement: f64) -> Result<f64, FilterError> {
        // Prediction: random walk, so the estimate carries over unchanged
        let a_priori_estimate = self.estimate;
        let a_priori_covariance = self.covariance + self.params.q;

        let denominator = a_priori_covariance + self.params.r;
        if denominator == 0.0 {
            return Err(FilterError::DegenerateParameters);
        }
        let gain = a_priori_covariance / denominator;

        // Correction
        self.estimate = a_priori_estimate + gain * (measurement - a_priori_estimate);
        self.covariance = (1.0 - gain) * a_priori_covariance;

        Ok(self.estimate)
    }

    /// Get the current state estimate
    pub fn estimate(&self) -> f64 {
        self.estimate
    }
}

/// Run one complete filter pass over `measurements`.
///
/// Pure with respect to its inputs: identical measurements, parameters and
/// initial estimate always produce an identical output sequence.
pub fn smooth(
    measurements: &[f64],
    params: KalmanParams,
    initial_estimate: f64,
) -> Result<Vec<f64>, FilterError> {
    let mut filter = ScalarKalman::new(params, initial_estimate)?;
    let mut predicted = Vec::with_capacity(measurements.len());

    for &value in measurements {
        predicted.push(filter.update(value)?);
    }

    Ok(predicted)
}
