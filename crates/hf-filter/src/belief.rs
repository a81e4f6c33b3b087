use hf_core::{Error, Grid};
use tracing::debug;

/// Uniform belief over the cells of `observations`.
///
/// Only the shape is read; every cell of the result is `1 / (rows * cols)`.
pub fn initialize_beliefs<T>(observations: &Grid<T>) -> Grid<f32> {
    let (rows, cols) = observations.shape();
    let p = uniform_probability(rows, cols);
    debug!(rows, cols, p, "initialized uniform belief");
    observations.map(|_| p)
}

/// Same as [`initialize_beliefs`] for nested rows, which are validated first.
pub fn initialize_beliefs_from_rows<T>(observations: &[Vec<T>]) -> Result<Grid<f32>, Error> {
    let (rows, cols) = Grid::shape_of_rows(observations)?;
    let p = uniform_probability(rows, cols);
    debug!(rows, cols, p, "initialized uniform belief");
    Grid::new_fill(rows, cols, p)
}

fn uniform_probability(rows: usize, cols: usize) -> f32 {
    (1.0 / (rows as f64 * cols as f64)) as f32
}
