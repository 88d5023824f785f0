//! Uniform sample times shared by every trajectory of a run.

use ndarray::Array1;

use crate::error::{ChaosError, ChaosResult};

/// Slack on horizon/step so that 30 / 0.02 counts 1500 samples, not 1501.
const COUNT_TOLERANCE: f64 = 1e-9;

/// Samples t_i = i·dt for i = 0, 1, … while t_i < horizon
///
/// Times are computed as `i * dt`, never by accumulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    step: f64,
    len: usize,
}

impl Default for TimeGrid {
    /// 30 s at 0.02 s (1500 samples)
    fn default() -> Self {
        Self { step: 0.02, len: 1500 }
    }
}

impl TimeGrid {
    /// Grid over [0, horizon) with spacing `step`
    pub fn new(horizon: f64, step: f64) -> ChaosResult<Self> {
        let invalid = ChaosError::InvalidTimeGrid { horizon, step };
        if !horizon.is_finite() || !step.is_finite() || step <= 0.0 || horizon <= 0.0 {
            return Err(invalid);
        }

        let len = (horizon / step - COUNT_TOLERANCE).ceil();
        if !(1.0..=(usize::MAX as f64)).contains(&len) {
            return Err(invalid);
        }

        Ok(Self { step, len: len as usize })
    }

    /// Sample spacing dt (s)
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of sample `i`
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.step
    }

    /// Time of the last sample
    pub fn final_time(&self) -> f64 {
        self.time(self.len - 1)
    }

    /// Covered span len·dt; at least the requested horizon, below it + dt
    pub fn span(&self) -> f64 {
        self.len as f64 * self.step
    }

    /// All sample times t_i = i·dt
    pub fn times(&self) -> Array1<f64> {
        Array1::from_iter((0..self.len).map(|i| self.time(i)))
    }
}
