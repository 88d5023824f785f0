//! Double Pendulum Lyapunov Sweep: Chaos vs. Link Masses
//!
//! Runs the reference study and prints a summary of the surface.
//!
//! ## Protocol
//!
//! 1. 60 × 60 mass grid, 0.5 kg to 30 kg on both links
//! 2. Nine release angles 10°..90° (θ₁ = θ₂), δ = 0.01°
//! 3. 30 s of motion at 0.02 s per trajectory
//! 4. Cell = mean over angles of max finite-time Lyapunov exponent
//!
//! Logging follows `RUST_LOG` (default `info`).

use pendulum_chaos::{ParameterSweep, ResultGrid, SweepConfig};
use tracing_subscriber::EnvFilter;

/// Print every `stride`-th row and column
fn print_excerpt(grid: &ResultGrid, stride: usize) {
    let cols: Vec<usize> = (0..grid.mass2_values().len()).step_by(stride).collect();

    print!(" M1\\M2 |");
    for &j in &cols {
        print!(" {:>7.1}", grid.mass2_values()[j]);
    }
    println!();
    println!("-------|{}", "-".repeat(8 * cols.len()));

    for i in (0..grid.mass1_values().len()).step_by(stride) {
        print!(" {:>5.1} |", grid.mass1_values()[i]);
        for &j in &cols {
            match grid.get(i, j) {
                Some(v) => print!(" {:>7.4}", v),
                None => print!(" {:>7}", "--"),
            }
        }
        println!();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Double Pendulum: Average Maximum Lyapunov Exponent");
    println!("  Effect of link masses on chaotic motion");
    println!("═══════════════════════════════════════════════════════════════\n");

    let config = SweepConfig::default();

    println!("System Parameters:");
    println!("  g = {:.2} m/s², L₁ = {:.2} m, L₂ = {:.2} m",
        config.physics.gravity, config.physics.length1, config.physics.length2);
    println!("  Masses: {} × {} values", config.mass1_values.len(), config.mass2_values.len());
    println!("  Start angles: {:?}°", config.start_angles);
    println!("  δ = {}°, horizon = {} s, dt = {} s", config.perturbation, config.horizon, config.time_step);
    println!("  Trajectory pairs: {}", config.n_estimations());
    println!();

    let grid = match ParameterSweep::from_config(&config).and_then(|sweep| sweep.run()) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("sweep failed: {}", err);
            std::process::exit(1);
        }
    };

    let values: Vec<f64> = grid.cells().iter().filter_map(|v| *v).collect();
    if values.is_empty() {
        println!("No cells finished.");
        return;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let extreme = |pick: fn(f64, f64) -> bool| {
        grid.cells()
            .indexed_iter()
            .filter_map(|((i, j), v)| v.map(|v| (grid.mass1_values()[i], grid.mass2_values()[j], v)))
            .reduce(|a, b| if pick(b.2, a.2) { b } else { a })
    };
    let lowest = extreme(|a, b| a < b);
    let highest = extreme(|a, b| a > b);

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Results");
    println!("═══════════════════════════════════════════════════════════════\n");
    println!("  Cells: {} complete, {} missing", values.len(), grid.failed_cells().len());
    println!("  λ̄ = {:.5}, σ = {:.5}", mean, var.sqrt());
    if let (Some((m1_lo, m2_lo, lo)), Some((m1_hi, m2_hi, hi))) = (lowest, highest) {
        println!("  min λ̄ = {:.5} at (M1, M2) = ({:.1}, {:.1}) kg", lo, m1_lo, m2_lo);
        println!("  max λ̄ = {:.5} at (M1, M2) = ({:.1}, {:.1}) kg", hi, m1_hi, m2_hi);
    }
    println!();

    print_excerpt(&grid, 6);
}
