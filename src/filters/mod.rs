//! Signal filters for raw load-cell readings.

pub mod kalman;

pub use kalman::{KalmanParams, ScalarKalman, smooth};
