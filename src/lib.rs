//! # Pendulum-Chaos
//!
//! Chaoticity of the double pendulum as a function of its two link
//! masses, measured by a finite-time Lyapunov exponent.
//!
//! ## Method
//!
//! 1. **Equations of motion**: Lagrangian double pendulum, point masses
//!    on rigid massless links, no friction
//!
//! 2. **Integration**: classical RK4 on a uniform time grid
//!    (default 30 s at 0.02 s)
//!
//! 3. **Divergence**: two releases from rest, the second offset by δ on
//!    both angles; d[i] = |θ₁ᴬ(tᵢ) − θ₁ᴮ(tᵢ)|
//!
//! 4. **Exponent**: λ_N = (1/N)·ln(d[N]/d[0]), reduced to max_N λ_N
//!
//! 5. **Sweep**: for every (m₁, m₂) the maximum is averaged over a set
//!    of start angles (θ₁ = θ₂ = a), giving one cell of the surface
//!
//! ## Data flow
//!
//! ```text
//! systems → integration → lyapunov::trajectory → lyapunov::estimator → sweep → ResultGrid
//! ```
//!
//! Rendering the [`ResultGrid`] (tables, heatmaps) is left to callers.

pub mod error;
pub mod systems;
pub mod integration;
pub mod lyapunov;
pub mod sweep;

pub use error::{ChaosError, ChaosResult};

// Re-exports from systems
pub use systems::{
    derivative,
    total_energy,
    DoublePendulum,
    DynamicalSystem,
    PhysicalParameters,
    State,
};

// Re-exports from integration
pub use integration::{
    integrate,
    integrate_system,
    rk4_step,
    TimeGrid,
};

// Re-exports from lyapunov
pub use lyapunov::{
    divergence,
    exponent_profile,
    max_exponent,
    max_lyapunov,
    validate_perturbation,
    MAX_PERTURBATION_RAD,
    DivergenceSeries,
    LyapunovProfile,
    Trajectory,
};

// Re-exports from sweep
pub use sweep::{
    linear_axis,
    sweep,
    CancellationFlag,
    DivergencePolicy,
    ParameterSweep,
    ResultGrid,
    SweepConfig,
};
