//! First-link angle series for one release from rest.

use ndarray::Array1;

use crate::error::ChaosResult;
use crate::integration::{integrate_system, TimeGrid};
use crate::systems::{DoublePendulum, PhysicalParameters, State};

/// θ₁(t) samples aligned 1:1 with a [`TimeGrid`]
pub type Trajectory = Array1<f64>;

/// Integrate from (θ₁, 0, θ₂, 0) with angles in degrees and return θ₁(t) in rad
///
/// Starting velocities are always zero; the chaos metric is defined for
/// pendulums released from rest.
pub fn run(
    theta1_deg: f64,
    theta2_deg: f64,
    params: &PhysicalParameters,
    grid: &TimeGrid,
) -> ChaosResult<Trajectory> {
    let initial = State::at_rest_deg(theta1_deg, theta2_deg);
    let states = integrate_system(&DoublePendulum::new(*params), initial, grid)?;
    Ok(states.iter().map(|s| s.theta1).collect())
}
