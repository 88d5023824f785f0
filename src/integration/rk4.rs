//! Classical fourth-order Runge-Kutta on a fixed grid
//!
//!   k₁ = f(yₙ)
//!   k₂ = f(yₙ + h/2·k₁)
//!   k₃ = f(yₙ + h/2·k₂)
//!   k₄ = f(yₙ + h·k₃)
//!   yₙ₊₁ = yₙ + h/6·(k₁ + 2k₂ + 2k₃ + k₄)
//!
//! Global error O(h⁴). No adaptivity, so identical inputs always give
//! bit-identical output.

use super::time_grid::TimeGrid;
use crate::error::{ChaosError, ChaosResult};
use crate::systems::{DynamicalSystem, State};

/// Single RK4 step of size `h`
pub fn rk4_step<F, P>(derivative_fn: &F, state: &State, h: f64, params: &P) -> State
where
    F: Fn(&State, &P) -> State,
{
    let y = *state;
    let k1 = derivative_fn(&y, params);
    let k2 = derivative_fn(&y.offset(&k1, h / 2.0), params);
    let k3 = derivative_fn(&y.offset(&k2, h / 2.0), params);
    let k4 = derivative_fn(&y.offset(&k3, h), params);

    y.offset(&(k1 + k2 * 2.0 + k3 * 2.0 + k4), h / 6.0)
}

/// Advance `initial` along `grid`, one state per sample
///
/// Element 0 is `initial` itself. Fails with `NumericalDivergence` on the
/// first non-finite state; no partial series is returned.
pub fn integrate<F, P>(
    derivative_fn: F,
    initial: State,
    grid: &TimeGrid,
    params: &P,
) -> ChaosResult<Vec<State>>
where
    F: Fn(&State, &P) -> State,
{
    if !initial.is_finite() {
        return Err(ChaosError::NumericalDivergence { step: 0, time: 0.0 });
    }

    let h = grid.step();
    let mut states = Vec::with_capacity(grid.len());
    states.push(initial);

    let mut y = initial;
    for step in 1..grid.len() {
        y = rk4_step(&derivative_fn, &y, h, params);
        if !y.is_finite() {
            return Err(ChaosError::NumericalDivergence { step, time: grid.time(step) });
        }
        states.push(y);
    }

    Ok(states)
}

/// [`integrate`] for any [`DynamicalSystem`] over [`State`]
pub fn integrate_system<S>(system: &S, initial: State, grid: &TimeGrid) -> ChaosResult<Vec<State>>
where
    S: DynamicalSystem<State = State>,
{
    integrate(|y: &State, sys: &S| sys.derivative(y), initial, grid, system)
}
