//! Error hierarchy for the pendulum chaos engine.
//!
//! Configuration errors (`InvalidParameters`, `InvalidPerturbation`,
//! `InvalidTimeGrid`, `InvalidAxis`) are raised once at the boundary of a
//! run. `NumericalDivergence` is a per-trajectory runtime condition that
//! the sweep driver handles according to its [`DivergencePolicy`].
//!
//! [`DivergencePolicy`]: crate::sweep::DivergencePolicy

use thiserror::Error;

/// Root error type for all engine failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChaosError {
    /// A physical constant is non-finite, or a mass/length is not > 0.
    #[error("invalid parameter `{name}` = {value}")]
    InvalidParameters { name: &'static str, value: f64 },

    /// Perturbation does not separate the two starting angles.
    #[error("invalid perturbation {perturbation}: must be finite, > 0 and produce a nonzero initial divergence")]
    InvalidPerturbation { perturbation: f64 },

    /// Integrator produced a NaN/Inf state.
    #[error("numerical divergence at step {step} (t = {time:.4} s): state is no longer finite")]
    NumericalDivergence { step: usize, time: f64 },

    /// Time grid step or horizon unusable.
    #[error("invalid time grid: horizon {horizon} s, step {step} s")]
    InvalidTimeGrid { horizon: f64, step: f64 },

    /// A sweep axis (mass1, mass2, or start angles) is empty or non-finite.
    #[error("sweep axis `{axis}` is empty or contains non-finite values")]
    InvalidAxis { axis: &'static str },

    /// The sweep was cancelled before every cell finished.
    #[error("sweep cancelled")]
    Cancelled,

    /// Worker pool could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

pub type ChaosResult<T> = Result<T, ChaosError>;
