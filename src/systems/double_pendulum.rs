//! Double Pendulum: Two Point Masses on Rigid Massless Links
//!
//! State y = (θ₁, ω₁, θ₂, ω₂), angles measured from the downward vertical.
//! With δ = θ₂ − θ₁ the Lagrangian equations of motion are
//!
//!   D₁ = (m₁ + m₂)·L₁ − m₂·L₁·cos²δ
//!
//!   dω₁/dt = [ m₂L₁ω₁² sinδ cosδ + m₂g sinθ₂ cosδ
//!              + m₂L₂ω₂² sinδ − (m₁+m₂) g sinθ₁ ] / D₁
//!
//!   dω₂/dt = [ −m₂L₂ω₂² sinδ cosδ + (m₁+m₂) g sinθ₁ cosδ
//!              − (m₁+m₂) L₁ω₁² sinδ − (m₁+m₂) g sinθ₂ ] / ((L₂/L₁)·D₁)
//!
//! No friction, no driving. D₁ ≥ m₁·L₁ > 0 for valid parameters, so the
//! right-hand side is finite for every finite state.
//!
//! ## Chaos
//!
//! Released from rest at small angles the motion is quasi-periodic.
//! At large angles (e.g. θ₁ = θ₂ = 120°) neighbouring trajectories
//! separate exponentially, which the Lyapunov estimator measures.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use super::traits::DynamicalSystem;
use crate::error::{ChaosError, ChaosResult};

/// Physical constants of one pendulum
///
/// Immutable once built; every simulation receives its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Length of the upper link (m)
    pub length1: f64,
    /// Length of the lower link (m)
    pub length2: f64,
    /// Mass at the end of the upper link (kg)
    pub mass1: f64,
    /// Mass at the end of the lower link (kg)
    pub mass2: f64,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            length1: 1.0,
            length2: 1.0,
            mass1: 1.0,
            mass2: 1.0,
        }
    }
}

impl PhysicalParameters {
    /// Build and validate a parameter set
    pub fn new(gravity: f64, length1: f64, length2: f64, mass1: f64, mass2: f64) -> ChaosResult<Self> {
        let params = Self { gravity, length1, length2, mass1, mass2 };
        params.validate()?;
        Ok(params)
    }

    /// Copy of `self` with both masses replaced
    pub fn with_masses(&self, mass1: f64, mass2: f64) -> ChaosResult<Self> {
        Self::new(self.gravity, self.length1, self.length2, mass1, mass2)
    }

    /// Reject non-finite constants and non-positive masses or lengths
    pub fn validate(&self) -> ChaosResult<()> {
        if !self.gravity.is_finite() {
            return Err(ChaosError::InvalidParameters { name: "gravity", value: self.gravity });
        }
        for (name, value) in [
            ("length1", self.length1),
            ("length2", self.length2),
            ("mass1", self.mass1),
            ("mass2", self.mass2),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChaosError::InvalidParameters { name, value });
            }
        }
        Ok(())
    }
}

/// Phase-space point (θ₁, ω₁, θ₂, ω₂) in rad and rad/s
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    pub theta1: f64,
    pub omega1: f64,
    pub theta2: f64,
    pub omega2: f64,
}

impl State {
    /// State from its four components
    pub fn new(theta1: f64, omega1: f64, theta2: f64, omega2: f64) -> Self {
        Self { theta1, omega1, theta2, omega2 }
    }

    /// Pendulum released from rest at the given angles (degrees)
    pub fn at_rest_deg(theta1_deg: f64, theta2_deg: f64) -> Self {
        Self::new(theta1_deg.to_radians(), 0.0, theta2_deg.to_radians(), 0.0)
    }

    /// All four components finite?
    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.omega1.is_finite()
            && self.theta2.is_finite()
            && self.omega2.is_finite()
    }

    /// Runge-Kutta stage point y + h·k
    pub fn offset(&self, k: &State, h: f64) -> State {
        *self + *k * h
    }

    /// Components in (θ₁, ω₁, θ₂, ω₂) order
    pub fn to_array(&self) -> [f64; 4] {
        [self.theta1, self.omega1, self.theta2, self.omega2]
    }
}

impl Add for State {
    type Output = State;

    fn add(self, rhs: State) -> State {
        State::new(
            self.theta1 + rhs.theta1,
            self.omega1 + rhs.omega1,
            self.theta2 + rhs.theta2,
            self.omega2 + rhs.omega2,
        )
    }
}

impl Mul<f64> for State {
    type Output = State;

    fn mul(self, h: f64) -> State {
        State::new(self.theta1 * h, self.omega1 * h, self.theta2 * h, self.omega2 * h)
    }
}

/// Equations of motion dy/dt = f(y; params)
pub fn derivative(state: &State, params: &PhysicalParameters) -> State {
    let PhysicalParameters { gravity: g, length1: l1, length2: l2, mass1: m1, mass2: m2 } = *params;
    let (th1, w1, th2, w2) = (state.theta1, state.omega1, state.theta2, state.omega2);

    let delta = th2 - th1;
    let (sin_d, cos_d) = delta.sin_cos();
    let m_total = m1 + m2;

    let den1 = m_total * l1 - m2 * l1 * cos_d * cos_d;
    let dw1 = (m2 * l1 * w1 * w1 * sin_d * cos_d
        + m2 * g * th2.sin() * cos_d
        + m2 * l2 * w2 * w2 * sin_d
        - m_total * g * th1.sin())
        / den1;

    let den2 = (l2 / l1) * den1;
    let dw2 = (-m2 * l2 * w2 * w2 * sin_d * cos_d
        + m_total * g * th1.sin() * cos_d
        - m_total * l1 * w1 * w1 * sin_d
        - m_total * g * th2.sin())
        / den2;

    State::new(w1, dw1, w2, dw2)
}

/// Kinetic plus potential energy (J), zero potential at the pivot
pub fn total_energy(state: &State, params: &PhysicalParameters) -> f64 {
    let PhysicalParameters { gravity: g, length1: l1, length2: l2, mass1: m1, mass2: m2 } = *params;
    let (th1, w1, th2, w2) = (state.theta1, state.omega1, state.theta2, state.omega2);

    let kinetic = 0.5 * m1 * (l1 * w1).powi(2)
        + 0.5 * m2 * ((l1 * w1).powi(2) + (l2 * w2).powi(2) + 2.0 * l1 * l2 * w1 * w2 * (th1 - th2).cos());
    let potential = -(m1 + m2) * g * l1 * th1.cos() - m2 * g * l2 * th2.cos();

    kinetic + potential
}

/// Double pendulum bound to one parameter set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulum {
    params: PhysicalParameters,
}

impl DoublePendulum {
    /// Pendulum with the given constants
    pub fn new(params: PhysicalParameters) -> Self {
        Self { params }
    }

    /// Constants this pendulum was built with
    pub fn params(&self) -> &PhysicalParameters {
        &self.params
    }
}

impl DynamicalSystem for DoublePendulum {
    type State = State;

    fn derivative(&self, state: &State) -> State {
        derivative(state, &self.params)
    }

    fn state_dimension(&self) -> usize {
        4
    }

    fn energy(&self, state: &State) -> Option<f64> {
        Some(total_energy(state, &self.params))
    }
}
