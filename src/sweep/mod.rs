//! Sweep Module: Chaos Surface over Link Masses
//!
//! - [`SweepConfig`]: serde-friendly description of a study
//! - [`ParameterSweep`] / [`sweep`]: parallel evaluation of every cell
//! - [`ResultGrid`]: mass-labeled surface for reporting layers
//!
//! Configuration errors abort before any integration. Numerical
//! divergence inside a cell follows the configured [`DivergencePolicy`].

mod config;
mod driver;
mod grid;

pub use config::{linear_axis, SweepConfig};
pub use driver::{sweep, CancellationFlag, DivergencePolicy, ParameterSweep};
pub use grid::ResultGrid;
