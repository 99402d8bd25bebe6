use std::fmt::{self, Display};
use std::path::PathBuf;

use clap::ValueEnum;

/// Where the matrix is read from when no path is given.
pub const DEFAULT_MATRIX_PATH: &str = "matrix";
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
pub const DEFAULT_SEED: u64 = 239;
pub const DEFAULT_PRECISION: usize = 6;

/// Eigenvalue algorithm used by the decomposition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    /// LAPACK general eigenvalue driver
    #[default]
    Lapack,
    /// Hessenberg reduction followed by Francis double-shift QR
    Francis,
    /// Householder tridiagonalization and Wilkinson-shifted QR (symmetric input only)
    Symmetric,
    /// Unshifted QR iteration with Givens rotations (real spectra only)
    Qr,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Lapack => write!(f, "lapack"),
            Method::Francis => write!(f, "francis"),
            Method::Symmetric => write!(f, "symmetric"),
            Method::Qr => write!(f, "qr"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub path: PathBuf,
    pub method: Method,
    /// Relative tolerance for deflation and convergence tests.
    pub tolerance: f64,
    /// Iteration cap; per eigenvalue for the shifted methods, total otherwise.
    pub max_iterations: usize,
    /// Seed for the power iteration start vector.
    pub seed: u64,
    /// Decimal places kept when printing.
    pub precision: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            path: PathBuf::from(DEFAULT_MATRIX_PATH),
            method: Method::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_SEED,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SolverConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        SolverConfig {
            path: path.into(),
            ..SolverConfig::default()
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}
