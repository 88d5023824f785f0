//! Physical Systems Module: Equations of Motion
//!
//! - **Double pendulum**: two point masses on rigid links under gravity,
//!   the classic low-dimensional chaotic mechanical system
//!
//! Models are pure functions of (state, parameters); the integrator
//! drives them through the [`DynamicalSystem`] trait.

mod traits;
mod double_pendulum;

pub use traits::DynamicalSystem;
pub use double_pendulum::{
    derivative,
    total_energy,
    DoublePendulum,
    PhysicalParameters,
    State,
};
