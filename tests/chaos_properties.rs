//! End-to-end checks of the chaos metric on known pendulum regimes.

use approx::assert_abs_diff_eq;
use pendulum_chaos::{
    derivative, divergence, exponent_profile, integrate, lyapunov, max_exponent, max_lyapunov, sweep,
    PhysicalParameters, State, TimeGrid,
};

const PERTURBATION_DEG: f64 = 0.01;

fn unit_pendulum() -> PhysicalParameters {
    PhysicalParameters::new(9.81, 1.0, 1.0, 1.0, 1.0).unwrap()
}

#[test]
fn test_step_size_convergence_at_two_seconds() {
    let params = unit_pendulum();
    let theta_at_2s = |dt: f64| {
        let grid = TimeGrid::new(2.0 + dt, dt).unwrap();
        assert_abs_diff_eq!(grid.final_time(), 2.0, epsilon = 1e-12);
        let traj = lyapunov::run(120.0, -10.0, &params, &grid).unwrap();
        traj[grid.len() - 1]
    };

    let coarse = theta_at_2s(0.02);
    let fine = theta_at_2s(0.01);
    assert!((coarse - fine).abs() < 1e-3, "dt=0.02 gives {}, dt=0.01 gives {}", coarse, fine);
}

#[test]
fn test_integration_is_repeatable() {
    let params = unit_pendulum();
    let grid = TimeGrid::default();
    let init = State::at_rest_deg(75.0, -20.0);
    assert_eq!(
        integrate(derivative, init, &grid, &params).unwrap(),
        integrate(derivative, init, &grid, &params).unwrap()
    );
}

#[test]
fn test_divergence_shape_and_profile_origin() {
    let grid = TimeGrid::default();
    let series = divergence(40.0, 40.0, &unit_pendulum(), PERTURBATION_DEG, &grid).unwrap();
    assert_eq!(series.len(), grid.len());
    assert!(series[0] > 0.0);

    let profile = exponent_profile(&series).unwrap();
    assert_eq!(profile.len(), series.len());
    assert_eq!(profile[0], 0.0);
}

#[test]
fn test_chaotic_release_has_positive_exponent() {
    let lambda = max_lyapunov(120.0, 120.0, &unit_pendulum(), PERTURBATION_DEG, &TimeGrid::default()).unwrap();
    assert!(lambda > 0.0, "expected chaos at 120°, got λ = {}", lambda);
}

#[test]
fn test_small_angle_release_is_much_calmer() {
    let grid = TimeGrid::default();
    let params = unit_pendulum();
    let chaotic = max_lyapunov(120.0, 120.0, &params, PERTURBATION_DEG, &grid).unwrap();
    let calm = max_lyapunov(1.0, 1.0, &params, PERTURBATION_DEG, &grid).unwrap();

    assert!(calm >= 0.0);
    assert!(
        calm < 0.25 * chaotic,
        "small-angle λ = {} should be far below chaotic λ = {}",
        calm,
        chaotic
    );
}

#[test]
fn test_single_cell_sweep_equals_scalar_metric() {
    let params = unit_pendulum();
    let grid = TimeGrid::default();

    let surface = sweep(&[1.0], &[1.0], &[10.0], &params, PERTURBATION_DEG, &grid).unwrap();
    let series = divergence(10.0, 10.0, &params, PERTURBATION_DEG, &grid).unwrap();
    let expected = max_exponent(&exponent_profile(&series).unwrap());

    assert_eq!(surface.shape(), (1, 1));
    assert_eq!(surface.value_at(1.0, 1.0), Some(expected));
}

#[test]
fn test_sweep_is_repeatable() {
    let masses = [0.5, 1.5];
    let angles = [30.0, 90.0];
    let grid = TimeGrid::new(5.0, 0.02).unwrap();
    let a = sweep(&masses, &masses, &angles, &unit_pendulum(), PERTURBATION_DEG, &grid).unwrap();
    let b = sweep(&masses, &masses, &angles, &unit_pendulum(), PERTURBATION_DEG, &grid).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_diagonal_symmetry_under_axis_swap() {
    let masses = [0.5, 2.0, 4.0];
    let angles = [20.0, 60.0];
    let grid = TimeGrid::new(5.0, 0.02).unwrap();
    let params = unit_pendulum();

    let forward = sweep(&masses, &masses, &angles, &params, PERTURBATION_DEG, &grid).unwrap();
    let reversed: Vec<f64> = masses.iter().rev().copied().collect();
    let swapped = sweep(&reversed, &masses, &angles, &params, PERTURBATION_DEG, &grid).unwrap();

    for &m in &masses {
        assert_eq!(forward.value_at(m, m), swapped.value_at(m, m), "diagonal cell m = {}", m);
    }
    // Same axes on both sides: the swapped-label view is the transpose
    assert_eq!(forward.transposed().value_at(2.0, 0.5), forward.value_at(0.5, 2.0));
}

#[test]
fn test_energy_nearly_conserved_over_reference_horizon() {
    let params = unit_pendulum();
    let grid = TimeGrid::default();
    let init = State::at_rest_deg(90.0, 90.0);
    let states = integrate(derivative, init, &grid, &params).unwrap();

    // Energy released falling from horizontal to hanging: 3·g·L
    let scale = 3.0 * 9.81;
    let e0 = pendulum_chaos::total_energy(&init, &params);
    let e_end = pendulum_chaos::total_energy(states.last().unwrap(), &params);
    assert!((e_end - e0).abs() < 0.01 * scale, "energy drift {} J over 30 s", e_end - e0);
}
