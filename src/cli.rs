use std::fmt::{self, Display};
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::{
    Method, SolverConfig, DEFAULT_MATRIX_PATH, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION,
    DEFAULT_SEED, DEFAULT_TOLERANCE,
};

#[derive(Parser)]
#[command(name = "eigsort")]
#[command(version)]
#[command(about = "Prints the sorted eigenvalues of an integer matrix file", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); EIGSORT_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the eigenvalues of a matrix file in ascending order
    Eigvals(EigvalsArgs),

    /// Print the dominant eigenvalue and eigenvector found by power iteration
    Dominant(DominantArgs),

    /// Check whether two matrix files have the same spectrum
    Cospectral(CospectralArgs),

    /// Print one of the factorizations the eigenvalue methods are built on
    Factor(FactorArgs),

    /// Print the spectrum (largest first) and expansion constant of a regular graph
    Expansion(ExpansionArgs),
}

/// Numerical settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct NumericArgs {
    /// Relative tolerance for convergence and deflation
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Decimal places kept in the output
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,
}

impl NumericArgs {
    pub fn config(&self, path: PathBuf) -> SolverConfig {
        SolverConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            precision: self.precision,
            ..SolverConfig::with_path(path)
        }
    }
}

#[derive(Args, Debug)]
pub struct EigvalsArgs {
    /// Matrix file, one row per line
    #[arg(default_value = DEFAULT_MATRIX_PATH)]
    pub path: PathBuf,

    /// Eigenvalue algorithm
    #[arg(short, long, value_enum, default_value_t = Method::Lapack)]
    pub method: Method,

    #[command(flatten)]
    pub numeric: NumericArgs,
}

impl EigvalsArgs {
    pub fn config(&self) -> SolverConfig {
        self.numeric.config(self.path.clone()).with_method(self.method)
    }
}

#[derive(Args, Debug)]
pub struct DominantArgs {
    /// Matrix file, one row per line
    #[arg(default_value = DEFAULT_MATRIX_PATH)]
    pub path: PathBuf,

    /// Seed for the random start vector
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    #[command(flatten)]
    pub numeric: NumericArgs,
}

impl DominantArgs {
    pub fn config(&self) -> SolverConfig {
        SolverConfig {
            seed: self.seed,
            ..self.numeric.config(self.path.clone())
        }
    }
}

#[derive(Args, Debug)]
pub struct CospectralArgs {
    /// First matrix file
    pub left: PathBuf,

    /// Second matrix file
    pub right: PathBuf,

    /// Eigenvalue algorithm
    #[arg(short, long, value_enum, default_value_t = Method::Lapack)]
    pub method: Method,

    #[command(flatten)]
    pub numeric: NumericArgs,
}

impl CospectralArgs {
    pub fn config(&self) -> SolverConfig {
        self.numeric.config(self.left.clone()).with_method(self.method)
    }
}

/// Factorizations available to `factor`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Factorization {
    /// A = QR with Givens rotations
    QrGivens,
    /// A = QR with Householder reflections
    QrHouseholder,
    /// Q^T A Q tridiagonal (symmetric input)
    Tridiagonal,
    /// Q^T A Q upper Hessenberg
    Hessenberg,
}

impl Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factorization::QrGivens => write!(f, "qr-givens"),
            Factorization::QrHouseholder => write!(f, "qr-householder"),
            Factorization::Tridiagonal => write!(f, "tridiagonal"),
            Factorization::Hessenberg => write!(f, "hessenberg"),
        }
    }
}

#[derive(Args, Debug)]
pub struct FactorArgs {
    /// Matrix file, one row per line
    #[arg(default_value = DEFAULT_MATRIX_PATH)]
    pub path: PathBuf,

    /// Factorization to compute
    #[arg(short, long, value_enum, default_value_t = Factorization::QrHouseholder)]
    pub form: Factorization,

    #[command(flatten)]
    pub numeric: NumericArgs,
}

#[derive(Args, Debug)]
pub struct ExpansionArgs {
    /// Adjacency matrix file, one row per line
    #[arg(default_value = DEFAULT_MATRIX_PATH)]
    pub path: PathBuf,

    /// Vertex degree; taken from the row sums when omitted
    #[arg(short, long)]
    pub degree: Option<f64>,

    /// Eigenvalue algorithm
    #[arg(short, long, value_enum, default_value_t = Method::Lapack)]
    pub method: Method,

    #[command(flatten)]
    pub numeric: NumericArgs,
}

impl ExpansionArgs {
    pub fn config(&self) -> SolverConfig {
        self.numeric.config(self.path.clone()).with_method(self.method)
    }
}
