//! Mass-labeled result surface handed to reporting layers.

use ndarray::Array2;

/// Averaged maximum Lyapunov exponent per (mass1, mass2)
///
/// Rows follow `mass1_values`, columns follow `mass2_values`. A cell is
/// `None` only when its pendulum diverged numerically under
/// [`DivergencePolicy::Skip`](super::DivergencePolicy::Skip).
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGrid {
    mass1_values: Vec<f64>,
    mass2_values: Vec<f64>,
    cells: Array2<Option<f64>>,
}

impl ResultGrid {
    pub(crate) fn new(mass1_values: Vec<f64>, mass2_values: Vec<f64>, cells: Array2<Option<f64>>) -> Self {
        debug_assert_eq!(cells.dim(), (mass1_values.len(), mass2_values.len()));
        Self { mass1_values, mass2_values, cells }
    }

    /// (rows, columns) = (|mass1|, |mass2|)
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Row labels (kg)
    pub fn mass1_values(&self) -> &[f64] {
        &self.mass1_values
    }

    /// Column labels (kg)
    pub fn mass2_values(&self) -> &[f64] {
        &self.mass2_values
    }

    /// Raw cells, `None` where a cell was skipped
    pub fn cells(&self) -> &Array2<Option<f64>> {
        &self.cells
    }

    /// Cell by row/column index; `None` if out of range or missing
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get((row, col)).copied().flatten()
    }

    /// Cell by mass labels (first matching row/column)
    pub fn value_at(&self, mass1: f64, mass2: f64) -> Option<f64> {
        let row = self.mass1_values.iter().position(|&m| m == mass1)?;
        let col = self.mass2_values.iter().position(|&m| m == mass2)?;
        self.get(row, col)
    }

    /// Mass pairs whose cell is missing
    pub fn failed_cells(&self) -> Vec<(f64, f64)> {
        self.cells
            .indexed_iter()
            .filter(|(_, v)| v.is_none())
            .map(|((i, j), _)| (self.mass1_values[i], self.mass2_values[j]))
            .collect()
    }

    /// Every cell holds a value?
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Dense numeric table, only when no cell is missing
    pub fn to_matrix(&self) -> Option<Array2<f64>> {
        let values: Option<Vec<f64>> = self.cells.iter().copied().collect();
        Array2::from_shape_vec(self.cells.dim(), values?).ok()
    }

    /// Same surface with the mass1/mass2 axes exchanged
    pub fn transposed(&self) -> Self {
        Self {
            mass1_values: self.mass2_values.clone(),
            mass2_values: self.mass1_values.clone(),
            cells: self.cells.t().to_owned(),
        }
    }
}
