//! Parallel Mass Sweep
//!
//! Every (m₁, m₂) cell is an independent task: it builds its own
//! [`PhysicalParameters`], runs the Lyapunov estimator once per start
//! angle (θ₁ = θ₂ = a), and returns the mean of the maxima. Cells are
//! dispatched to a bounded rayon pool and the grid is assembled from the
//! returned (row, col, outcome) triples, so no accumulator is shared.
//!
//! ## Determinism
//!
//! Inside a cell the angles are summed in input order, so the surface is
//! bit-identical for any pool size.
//!
//! ## Numerical divergence
//!
//! - [`DivergencePolicy::Abort`]: the first divergent cell cancels the
//!   remaining work and the sweep fails with `NumericalDivergence`
//!   (lowest row-major cell among those that diverged).
//! - [`DivergencePolicy::Skip`]: the cell is recorded as missing and the
//!   sweep continues.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::SweepConfig;
use super::grid::ResultGrid;
use crate::error::{ChaosError, ChaosResult};
use crate::integration::TimeGrid;
use crate::lyapunov::{max_lyapunov, validate_perturbation};
use crate::systems::PhysicalParameters;

/// What a numerically divergent cell does to the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergencePolicy {
    /// Fail the whole sweep
    #[default]
    Abort,
    /// Leave the cell empty and keep going
    Skip,
}

/// Shared flag for cooperative cancellation
///
/// Workers check it before every start angle; a cancelled sweep returns
/// `ChaosError::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Fresh, uncancelled flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every worker sharing this flag to stop
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Has `cancel` been called on any clone?
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Configured mass sweep, ready to run
#[derive(Debug, Clone)]
pub struct ParameterSweep {
    mass1_values: Vec<f64>,
    mass2_values: Vec<f64>,
    start_angles: Vec<f64>,
    template: PhysicalParameters,
    perturbation: f64,
    grid: TimeGrid,
    policy: DivergencePolicy,
    worker_threads: Option<usize>,
    cancel: CancellationFlag,
}

impl ParameterSweep {
    /// Sweep with `Abort` policy on every core
    pub fn new(
        mass1_values: &[f64],
        mass2_values: &[f64],
        start_angles: &[f64],
        template: &PhysicalParameters,
        perturbation: f64,
        grid: &TimeGrid,
    ) -> Self {
        Self {
            mass1_values: mass1_values.to_vec(),
            mass2_values: mass2_values.to_vec(),
            start_angles: start_angles.to_vec(),
            template: *template,
            perturbation,
            grid: *grid,
            policy: DivergencePolicy::default(),
            worker_threads: None,
            cancel: CancellationFlag::new(),
        }
    }

    /// Sweep described by `config`, including policy and pool size
    pub fn from_config(config: &SweepConfig) -> ChaosResult<Self> {
        let grid = config.time_grid()?;
        Ok(Self::new(
            &config.mass1_values,
            &config.mass2_values,
            &config.start_angles,
            &config.template(),
            config.perturbation,
            &grid,
        )
        .with_policy(config.policy)
        .with_worker_threads(config.worker_threads))
    }

    /// Replace the divergence policy
    pub fn with_policy(mut self, policy: DivergencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound the worker pool; `None` uses every core
    pub fn with_worker_threads(mut self, threads: Option<usize>) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Share an existing cancellation flag
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancel = flag;
        self
    }

    /// Handle that cancels this sweep from another thread
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Fail-fast checks on everything except the dynamics themselves
    pub fn validate(&self) -> ChaosResult<()> {
        for (axis, values) in [
            ("mass1_values", &self.mass1_values),
            ("mass2_values", &self.mass2_values),
            ("start_angles", &self.start_angles),
        ] {
            if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
                return Err(ChaosError::InvalidAxis { axis });
            }
        }

        self.template.validate()?;
        for &m1 in &self.mass1_values {
            for &m2 in &self.mass2_values {
                self.template.with_masses(m1, m2)?;
            }
        }
        for &angle in &self.start_angles {
            validate_perturbation(angle, self.perturbation)?;
        }
        if let Some(0) = self.worker_threads {
            return Err(ChaosError::ThreadPool("worker_threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Validate, then evaluate every cell
    pub fn run(&self) -> ChaosResult<ResultGrid> {
        self.validate()?;

        let (rows, cols) = (self.mass1_values.len(), self.mass2_values.len());
        info!(
            rows,
            cols,
            angles = self.start_angles.len(),
            samples = self.grid.len(),
            dt = self.grid.step(),
            policy = ?self.policy,
            threads = ?self.worker_threads,
            "starting mass sweep"
        );
        let started = Instant::now();

        let outcomes = self.evaluate_cells()?;

        let grid = self.assemble(outcomes)?;
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            failed = grid.failed_cells().len(),
            "mass sweep finished"
        );
        Ok(grid)
    }

    /// (row, col, outcome) for every cell in row-major order
    ///
    /// Under `Abort` the first divergent cell raises a shared flag and the
    /// cells still running return `Cancelled` at their next start angle.
    fn evaluate_cells(&self) -> ChaosResult<Vec<(usize, usize, ChaosResult<f64>)>> {
        let (rows, cols) = (self.mass1_values.len(), self.mass2_values.len());
        let abort = AtomicBool::new(false);
        let cells: Vec<(usize, usize)> = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .collect();

        let evaluate = || -> Vec<(usize, usize, ChaosResult<f64>)> {
            cells
                .par_iter()
                .map(|&(i, j)| {
                    let outcome = self.evaluate_cell(i, j, &abort);
                    if let Err(ChaosError::NumericalDivergence { .. }) = outcome {
                        if self.policy == DivergencePolicy::Abort {
                            abort.store(true, Ordering::Relaxed);
                        }
                    }
                    (i, j, outcome)
                })
                .collect()
        };

        match self.worker_threads {
            Some(n) => Ok(rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ChaosError::ThreadPool(e.to_string()))?
                .install(evaluate)),
            None => Ok(evaluate()),
        }
    }

    /// Mean over start angles of the maximum exponent for one cell
    fn evaluate_cell(&self, row: usize, col: usize, abort: &AtomicBool) -> ChaosResult<f64> {
        let (m1, m2) = (self.mass1_values[row], self.mass2_values[col]);
        let params = self.template.with_masses(m1, m2)?;

        let mut sum = 0.0;
        for &angle in &self.start_angles {
            if self.cancel.is_cancelled() || abort.load(Ordering::Relaxed) {
                return Err(ChaosError::Cancelled);
            }
            sum += max_lyapunov(angle, angle, &params, self.perturbation, &self.grid)?;
        }
        let mean = sum / self.start_angles.len() as f64;

        debug!(mass1 = m1, mass2 = m2, lyapunov = mean, "cell done");
        Ok(mean)
    }

    fn assemble(&self, outcomes: Vec<(usize, usize, ChaosResult<f64>)>) -> ChaosResult<ResultGrid> {
        let mut cells = Array2::from_elem((self.mass1_values.len(), self.mass2_values.len()), None);
        let mut divergence = None;
        let mut cancelled = false;

        for (i, j, outcome) in outcomes {
            match outcome {
                Ok(value) => cells[[i, j]] = Some(value),
                Err(err @ ChaosError::NumericalDivergence { .. }) => match self.policy {
                    DivergencePolicy::Abort => {
                        divergence.get_or_insert(err);
                    }
                    DivergencePolicy::Skip => {
                        warn!(
                            mass1 = self.mass1_values[i],
                            mass2 = self.mass2_values[j],
                            error = %err,
                            "skipping divergent cell"
                        );
                    }
                },
                Err(ChaosError::Cancelled) => cancelled = true,
                Err(err) => return Err(err),
            }
        }

        if let Some(err) = divergence {
            warn!(error = %err, "mass sweep aborted");
            return Err(err);
        }
        if cancelled {
            warn!("mass sweep cancelled");
            return Err(ChaosError::Cancelled);
        }

        Ok(ResultGrid::new(self.mass1_values.clone(), self.mass2_values.clone(), cells))
    }
}

/// Averaged maximum Lyapunov exponent over a (mass1 × mass2) grid
///
/// Runs on every core and aborts on the first numerically divergent cell.
pub fn sweep(
    mass1_values: &[f64],
    mass2_values: &[f64],
    start_angles: &[f64],
    template: &PhysicalParameters,
    perturbation: f64,
    grid: &TimeGrid,
) -> ChaosResult<ResultGrid> {
    ParameterSweep::new(mass1_values, mass2_values, start_angles, template, perturbation, grid).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::linear_axis;

    fn short_grid() -> TimeGrid {
        TimeGrid::new(2.0, 0.02).unwrap()
    }

    /// Gravity large enough that the first RK4 stage overflows ω²
    fn exploding_template() -> PhysicalParameters {
        PhysicalParameters { gravity: 1e300, ..PhysicalParameters::default() }
    }

    #[test]
    fn test_validation_errors() {
        let params = PhysicalParameters::default();
        let grid = short_grid();

        assert_eq!(
            sweep(&[], &[1.0], &[10.0], &params, 0.01, &grid),
            Err(ChaosError::InvalidAxis { axis: "mass1_values" })
        );
        assert_eq!(
            sweep(&[1.0], &[1.0], &[f64::NAN], &params, 0.01, &grid),
            Err(ChaosError::InvalidAxis { axis: "start_angles" })
        );
        assert_eq!(
            sweep(&[1.0], &[-2.0], &[10.0], &params, 0.01, &grid),
            Err(ChaosError::InvalidParameters { name: "mass2", value: -2.0 })
        );
        assert_eq!(
            sweep(&[1.0], &[1.0], &[10.0], &params, 0.0, &grid),
            Err(ChaosError::InvalidPerturbation { perturbation: 0.0 })
        );
        let sweep_zero_threads = ParameterSweep::new(&[1.0], &[1.0], &[10.0], &params, 0.01, &grid)
            .with_worker_threads(Some(0));
        assert!(matches!(sweep_zero_threads.run(), Err(ChaosError::ThreadPool(_))));
    }

    #[test]
    fn test_abort_policy_fails_sweep() {
        let result = ParameterSweep::new(&[1.0, 2.0], &[1.0], &[90.0], &exploding_template(), 0.01, &short_grid())
            .with_policy(DivergencePolicy::Abort)
            .run();
        assert!(
            matches!(result, Err(ChaosError::NumericalDivergence { .. })),
            "expected divergence, got {:?}",
            result
        );
    }

    #[test]
    fn test_skip_policy_records_missing_cells() {
        let grid = ParameterSweep::new(&[1.0, 2.0], &[1.0], &[90.0], &exploding_template(), 0.01, &short_grid())
            .with_policy(DivergencePolicy::Skip)
            .run()
            .unwrap();
        assert_eq!(grid.shape(), (2, 1));
        assert_eq!(grid.failed_cells(), vec![(1.0, 1.0), (2.0, 1.0)]);
        assert_eq!(grid.to_matrix(), None);
    }

    /// Second mass swamps the first in m₁ + m₂, so D₁ rounds to zero
    const DEGENERATE_MASS: f64 = 1e20;

    #[test]
    fn test_abort_on_one_divergent_cell_among_healthy_ones() {
        let mass2 = [1.0, DEGENERATE_MASS, 2.0];
        let result = ParameterSweep::new(&[1.0], &mass2, &[45.0], &PhysicalParameters::default(), 0.01, &short_grid())
            .with_policy(DivergencePolicy::Abort)
            .run();
        assert!(
            matches!(result, Err(ChaosError::NumericalDivergence { step: 1, .. })),
            "expected divergence, got {:?}",
            result
        );
    }

    #[test]
    fn test_abort_stops_remaining_cells() {
        // One worker visits cells in order, so every cell after the
        // divergent one must observe the abort flag
        let mass2 = [DEGENERATE_MASS, 1.0, 2.0, 3.0];
        let outcomes = ParameterSweep::new(&[1.0], &mass2, &[30.0, 60.0], &PhysicalParameters::default(), 0.01, &short_grid())
            .with_policy(DivergencePolicy::Abort)
            .with_worker_threads(Some(1))
            .evaluate_cells()
            .unwrap();

        assert!(matches!(outcomes[0].2, Err(ChaosError::NumericalDivergence { .. })));
        for (_, j, outcome) in &outcomes[1..] {
            assert_eq!(*outcome, Err(ChaosError::Cancelled), "cell {} kept running", j);
        }
    }

    #[test]
    fn test_skip_leaves_only_divergent_cell_empty() {
        let params = PhysicalParameters::default();
        let grid = short_grid();
        let mass2 = [1.0, DEGENERATE_MASS, 2.0];

        let surface = ParameterSweep::new(&[1.0], &mass2, &[45.0], &params, 0.01, &grid)
            .with_policy(DivergencePolicy::Skip)
            .run()
            .unwrap();

        assert_eq!(surface.failed_cells(), vec![(1.0, DEGENERATE_MASS)]);
        for &m2 in &[1.0, 2.0] {
            let expected = max_lyapunov(45.0, 45.0, &params.with_masses(1.0, m2).unwrap(), 0.01, &grid).unwrap();
            assert_eq!(surface.value_at(1.0, m2), Some(expected));
        }
    }

    #[test]
    fn test_cancel_from_another_thread_mid_sweep() {
        let masses = linear_axis(0.5, 0.5, 30);
        let angles = linear_axis(10.0, 10.0, 9);
        let runner = ParameterSweep::new(&masses, &masses, &angles, &PhysicalParameters::default(), 0.01, &TimeGrid::default())
            .with_worker_threads(Some(2));
        let flag = runner.cancellation_flag();

        let canceller = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            flag.cancel();
        });
        let result = runner.run();
        canceller.join().unwrap();

        assert_eq!(result, Err(ChaosError::Cancelled));
    }

    #[test]
    fn test_pre_cancelled_sweep() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let result = ParameterSweep::new(&[1.0], &[1.0], &[10.0], &PhysicalParameters::default(), 0.01, &short_grid())
            .with_cancellation(flag)
            .run();
        assert_eq!(result, Err(ChaosError::Cancelled));
    }

    #[test]
    fn test_pool_size_does_not_change_result() {
        let masses = [0.5, 2.0, 5.0];
        let angles = [30.0, 120.0];
        let params = PhysicalParameters::default();
        let grid = short_grid();

        let single = ParameterSweep::new(&masses, &masses, &angles, &params, 0.01, &grid)
            .with_worker_threads(Some(1))
            .run()
            .unwrap();
        let many = ParameterSweep::new(&masses, &masses, &angles, &params, 0.01, &grid)
            .with_worker_threads(Some(4))
            .run()
            .unwrap();
        assert_eq!(single, many);
        assert!(single.is_complete());
    }

    #[test]
    fn test_cell_is_mean_over_angles() {
        let params = PhysicalParameters::default();
        let grid = short_grid();
        let angles = [20.0, 70.0, 130.0];

        let result = sweep(&[1.0], &[1.0], &angles, &params, 0.01, &grid).unwrap();
        let expected = angles
            .iter()
            .map(|&a| max_lyapunov(a, a, &params, 0.01, &grid).unwrap())
            .sum::<f64>()
            / angles.len() as f64;
        assert_eq!(result.get(0, 0), Some(expected));
    }

    #[test]
    fn test_from_config() {
        let config = SweepConfig {
            mass1_values: vec![1.0, 3.0],
            mass2_values: vec![2.0],
            start_angles: vec![45.0],
            horizon: 1.0,
            worker_threads: Some(2),
            ..SweepConfig::default()
        };
        let grid = ParameterSweep::from_config(&config).unwrap().run().unwrap();
        assert_eq!(grid.shape(), (2, 1));
        assert_eq!(grid.mass1_values(), &[1.0, 3.0]);
        assert!(grid.is_complete());

        let bad = SweepConfig { time_step: -1.0, ..SweepConfig::default() };
        assert!(matches!(ParameterSweep::from_config(&bad), Err(ChaosError::InvalidTimeGrid { .. })));
    }
}
