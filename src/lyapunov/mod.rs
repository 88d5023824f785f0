//! Lyapunov Module: Sensitivity to Initial Conditions
//!
//! - **trajectory**: θ₁(t) for one release from rest
//! - **estimator**: divergence of two neighbouring releases, the
//!   finite-time exponent profile, and its maximum
//!
//! The reduction (maximum over the profile) is the metric the mass
//! sweep averages; it is a finite-horizon proxy, not a Benettin/Wolf
//! estimate of the asymptotic exponent.

pub mod trajectory;
mod estimator;

pub use trajectory::{run, Trajectory};
pub use estimator::{
    divergence,
    exponent_profile,
    max_exponent,
    max_lyapunov,
    validate_perturbation,
    MAX_PERTURBATION_RAD,
    DivergenceSeries,
    LyapunovProfile,
};
