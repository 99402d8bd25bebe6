//! File to sorted spectrum: load, parse, decompose, sort.

use std::path::Path;

use ndarray::Array2;
use num_complex::Complex64;

use crate::config::SolverConfig;
use crate::error::{Result, SolverError};
use crate::input;
use crate::linalg;
use crate::math::{CloseEnough, SpectralOrder};

/// Smallest tolerance used when comparing two spectra.
const MIN_SPECTRUM_TOLERANCE: f64 = 1e-6;

/// Reads the matrix at `config.path` and returns its sorted eigenvalues.
pub fn run(config: &SolverConfig) -> Result<Vec<Complex64>> {
    let matrix = load_matrix(&config.path)?;
    spectrum(&matrix, config)
}

/// Load and parse steps, converted to floating point.
pub fn load_matrix(path: &Path) -> Result<Array2<f64>> {
    let text = input::load(path)?;
    log::debug!("read {} bytes from {}", text.len(), path.display());
    let matrix = input::parse(&text)?;
    log::info!("parsed {}x{} matrix from {}", matrix.nrows(), matrix.ncols(), path.display());
    Ok(matrix.mapv(|x| x as f64))
}

/// Decompose and sort steps.
pub fn spectrum(matrix: &Array2<f64>, config: &SolverConfig) -> Result<Vec<Complex64>> {
    let mut values = linalg::eigenvalues(matrix, config)?;
    values.sort_by(SpectralOrder::spectral_cmp);
    Ok(values)
}

/// Whether two matrices have the same sorted spectrum.
///
/// Cospectral adjacency matrices are a necessary (not sufficient) condition
/// for two graphs to be isomorphic.
pub fn cospectral(left: &Array2<f64>, right: &Array2<f64>, config: &SolverConfig) -> Result<bool> {
    let a = spectrum(left, config)?;
    let b = spectrum(right, config)?;
    let tol = config.tolerance.max(MIN_SPECTRUM_TOLERANCE);
    let scale = a
        .iter()
        .chain(&b)
        .map(|v| v.norm())
        .fold(1.0, f64::max);
    Ok(a[..].close_enough(&b[..], tol * scale))
}

/// Spectral expansion of a `d`-regular graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    /// Eigenvalues, largest first.
    pub values: Vec<Complex64>,
    pub degree: f64,
    /// `max(|λ₂|, |λₙ|) / d`; small values mean a good expander.
    pub alpha: f64,
}

/// Spectral expansion constant of the graph with adjacency `matrix`.
///
/// Without an explicit `degree` the matrix must be regular and its common
/// row sum is used. Multi-edges and self-loops count with their weight.
pub fn expansion(
    matrix: &Array2<f64>,
    degree: Option<f64>,
    config: &SolverConfig,
) -> Result<Expansion> {
    linalg::ensure_square(matrix)?;
    let degree = match degree {
        Some(d) => d,
        None => regular_degree(matrix, config.tolerance)?,
    };
    let n = matrix.nrows();
    if n < 2 || degree <= 0.0 {
        return Err(SolverError::DegenerateGraph);
    }

    let mut values = spectrum(matrix, config)?;
    values.reverse();
    let alpha = values[1].norm().max(values[n - 1].norm()) / degree;
    log::info!("{}-regular graph on {} vertices, alpha = {}", degree, n, alpha);

    Ok(Expansion {
        values,
        degree,
        alpha,
    })
}

/// Common row sum of a regular adjacency matrix.
fn regular_degree(matrix: &Array2<f64>, tol: f64) -> Result<f64> {
    let sums: Vec<f64> = matrix.rows().into_iter().map(|row| row.sum()).collect();
    let expected = sums.first().copied().unwrap_or(0.0);
    for (row, &found) in sums.iter().enumerate() {
        if (found - expected).abs() > tol * expected.abs().max(1.0) {
            return Err(SolverError::NotRegular {
                row: row + 1,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}
