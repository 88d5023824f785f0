//! Sweep configuration: one serde-friendly value describing a study.

use serde::{Deserialize, Serialize};

use super::driver::{DivergencePolicy, ParameterSweep};
use crate::error::ChaosResult;
use crate::integration::TimeGrid;
use crate::systems::PhysicalParameters;

/// `start, start + step, …` with `count` values, each computed directly
pub fn linear_axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Full description of a mass sweep
///
/// `Default` reproduces the reference study: 60 × 60 masses from 0.5 kg
/// to 30 kg, start angles 10°..90°, δ = 0.01°, 30 s at 0.02 s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Row axis (kg)
    pub mass1_values: Vec<f64>,
    /// Column axis (kg)
    pub mass2_values: Vec<f64>,
    /// Release angles, applied to both links (degrees)
    pub start_angles: Vec<f64>,
    /// Offset of the neighbouring release (degrees)
    pub perturbation: f64,
    /// Gravity and link lengths; masses are overwritten per cell
    pub physics: PhysicalParameters,
    /// Simulated time (s)
    pub horizon: f64,
    /// Integration step and sample spacing (s)
    pub time_step: f64,
    /// Handling of numerically divergent cells
    pub policy: DivergencePolicy,
    /// Worker pool size; `None` uses every core
    pub worker_threads: Option<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            mass1_values: linear_axis(0.5, 0.5, 60),
            mass2_values: linear_axis(0.5, 0.5, 60),
            start_angles: linear_axis(10.0, 10.0, 9),
            perturbation: 0.01,
            physics: PhysicalParameters::default(),
            horizon: 30.0,
            time_step: 0.02,
            policy: DivergencePolicy::Abort,
            worker_threads: None,
        }
    }
}

impl SweepConfig {
    /// Sample grid for every trajectory of the study
    pub fn time_grid(&self) -> ChaosResult<TimeGrid> {
        TimeGrid::new(self.horizon, self.time_step)
    }

    /// Physical constants shared by every cell; masses are replaced per cell
    pub fn template(&self) -> PhysicalParameters {
        self.physics
    }

    /// Every check a sweep would perform before integrating
    pub fn validate(&self) -> ChaosResult<()> {
        ParameterSweep::from_config(self)?.validate()
    }

    /// Number of (mass1, mass2) cells
    pub fn n_cells(&self) -> usize {
        self.mass1_values.len() * self.mass2_values.len()
    }

    /// Number of trajectory pairs the sweep will integrate
    pub fn n_estimations(&self) -> usize {
        self.n_cells() * self.start_angles.len()
    }
}
