//! Finite-Time Lyapunov Estimator
//!
//! Two releases from rest, the second offset by a small perturbation δ
//! on both angles, give the divergence series
//!
//!   d[i] = |θ₁ᴬ(tᵢ) − θ₁ᴮ(tᵢ)|
//!
//! and for every sample index N ≥ 1 the finite-time estimate
//!
//!   λ_N = (1/N) · ln(d[N] / d[0]),   λ₀ = 0
//!
//! The chaos metric is max_N λ_N. N is the sample index, not the elapsed
//! time, so λ is a rate per sample.
//!
//! ## Degenerate cases
//!
//! - δ ≤ 0, or δ ≥ 1 rad (≈ 57.3°): `InvalidPerturbation`; the two
//!   releases must be neighbours
//! - d[0] = 0 (δ below angle resolution): `InvalidPerturbation`
//! - d[N] = 0 for some N > 0: λ_N = −∞, which never wins the maximum

use ndarray::Array1;

use super::trajectory;
use crate::error::{ChaosError, ChaosResult};
use crate::integration::TimeGrid;
use crate::systems::PhysicalParameters;

/// |θ₁ᴬ − θ₁ᴮ| per sample (rad)
pub type DivergenceSeries = Array1<f64>;

/// λ_N per sample, λ₀ = 0
pub type LyapunovProfile = Array1<f64>;

/// Largest accepted δ, in radians
pub const MAX_PERTURBATION_RAD: f64 = 1.0;

/// Check that `perturbation` (degrees) is small and separates the two releases at θ₁
///
/// Runs before any integration so a useless δ never costs a simulation.
pub fn validate_perturbation(theta1_deg: f64, perturbation: f64) -> ChaosResult<()> {
    let invalid = ChaosError::InvalidPerturbation { perturbation };
    if !perturbation.is_finite() || perturbation <= 0.0 || perturbation.to_radians() >= MAX_PERTURBATION_RAD {
        return Err(invalid);
    }

    let d0 = ((theta1_deg + perturbation).to_radians() - theta1_deg.to_radians()).abs();
    if d0 > 0.0 && d0.is_finite() {
        Ok(())
    } else {
        Err(invalid)
    }
}

/// Divergence between releases at (θ₁, θ₂) and (θ₁ + δ, θ₂ + δ), degrees
pub fn divergence(
    theta1_deg: f64,
    theta2_deg: f64,
    params: &PhysicalParameters,
    perturbation: f64,
    grid: &TimeGrid,
) -> ChaosResult<DivergenceSeries> {
    params.validate()?;
    validate_perturbation(theta1_deg, perturbation)?;

    let a = trajectory::run(theta1_deg, theta2_deg, params, grid)?;
    let b = trajectory::run(theta1_deg + perturbation, theta2_deg + perturbation, params, grid)?;

    Ok((&a - &b).mapv(f64::abs))
}

/// λ_N = (1/N)·ln(d[N]/d[0]) for every N, with λ₀ = 0
pub fn exponent_profile(series: &DivergenceSeries) -> ChaosResult<LyapunovProfile> {
    let d0 = match series.first() {
        Some(&d0) if d0 > 0.0 && d0.is_finite() => d0,
        Some(&d0) => return Err(ChaosError::InvalidPerturbation { perturbation: d0 }),
        None => return Err(ChaosError::InvalidPerturbation { perturbation: 0.0 }),
    };

    Ok(series
        .iter()
        .enumerate()
        .map(|(n, &d)| if n == 0 { 0.0 } else { (d / d0).ln() / n as f64 })
        .collect())
}

/// Largest entry of the profile
///
/// Never below zero because λ₀ = 0 is always present.
pub fn max_exponent(profile: &LyapunovProfile) -> f64 {
    profile.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// divergence → exponent_profile → max_exponent for one start configuration
pub fn max_lyapunov(
    theta1_deg: f64,
    theta2_deg: f64,
    params: &PhysicalParameters,
    perturbation: f64,
    grid: &TimeGrid,
) -> ChaosResult<f64> {
    let series = divergence(theta1_deg, theta2_deg, params, perturbation, grid)?;
    let profile = exponent_profile(&series)?;
    Ok(max_exponent(&profile))
}
