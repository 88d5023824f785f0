//! Integration Module: Fixed-Step ODE Solver
//!
//! - [`TimeGrid`]: uniform, read-only sample times reused by every run
//! - [`integrate`]: classical RK4 along the grid, step = grid spacing
//!
//! A run either yields one state per grid sample or fails with
//! `NumericalDivergence`; NaN/Inf never leave the integrator.

mod rk4;
mod time_grid;

pub use rk4::{integrate, integrate_system, rk4_step};
pub use time_grid::TimeGrid;
