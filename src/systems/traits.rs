//! Dynamical System Traits: Seam Between Models and the Integrator
//!
//! The integrator never names a concrete model. Anything that can map a
//! state to its time derivative can be advanced along a [`TimeGrid`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DynamicalSystem Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + derivative()        - Equations of motion dy/dt = f(y)   │
//! │  + state_dimension()   - Number of state components         │
//! │  + energy()            - Conserved quantity, if any         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`TimeGrid`]: crate::integration::TimeGrid

/// Trait for autonomous ODE systems driven by the fixed-step integrator
pub trait DynamicalSystem {
    /// State type for this system
    type State;

    /// Time derivative of `state`. Must be pure and deterministic.
    fn derivative(&self, state: &Self::State) -> Self::State;

    /// Dimension of state space
    fn state_dimension(&self) -> usize;

    /// Conserved total energy at `state`
    ///
    /// Conservative systems return `Some`; used to check integrator drift.
    fn energy(&self, _state: &Self::State) -> Option<f64> {
        None
    }
}
