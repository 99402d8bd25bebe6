//! One executor per subcommand. Results go to stdout.

use std::io::{self, Write};

use ndarray::Array2;
use num_complex::Complex64;

use crate::cli::{
    Commands, CospectralArgs, DominantArgs, EigvalsArgs, ExpansionArgs, FactorArgs, Factorization,
};
use crate::error::Result;
use crate::linalg;
use crate::report::{round_to, Matrix, Spectrum, Vector};
use crate::solver;
use crate::utils::output::print_warning;

pub fn run(cmd: Commands) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cmd, &mut out)?;
    out.flush()?;
    Ok(())
}

fn execute(cmd: Commands, out: &mut impl Write) -> Result<()> {
    match cmd {
        Commands::Eigvals(args) => eigvals(args, out),
        Commands::Dominant(args) => dominant(args, out),
        Commands::Cospectral(args) => cospectral(args, out),
        Commands::Factor(args) => factor(args, out),
        Commands::Expansion(args) => expansion(args, out),
    }
}

fn eigvals(args: EigvalsArgs, out: &mut impl Write) -> Result<()> {
    let config = args.config();
    let values = solver::run(&config)?;
    writeln!(out, "{}", Spectrum::new(&values, config.precision))?;
    Ok(())
}

fn dominant(args: DominantArgs, out: &mut impl Write) -> Result<()> {
    let config = args.config();
    let matrix = solver::load_matrix(&config.path)?;
    let pair = linalg::power_iteration(&matrix, &config)?;
    log::info!("power iteration took {} steps", pair.iterations);
    writeln!(
        out,
        "{} {}",
        Spectrum::new(&[Complex64::new(pair.value, 0.0)], config.precision),
        Vector::new(&pair.vector, config.precision)
    )?;
    Ok(())
}

fn cospectral(args: CospectralArgs, out: &mut impl Write) -> Result<()> {
    let config = args.config();
    let left = solver::load_matrix(&args.left)?;
    let right = solver::load_matrix(&args.right)?;
    if let Some(warning) = size_mismatch(&left, &right) {
        print_warning(&warning);
    }
    let same = solver::cospectral(&left, &right, &config)?;
    writeln!(out, "{}", if same { "cospectral" } else { "not cospectral" })?;
    Ok(())
}

fn size_mismatch(left: &Array2<f64>, right: &Array2<f64>) -> Option<String> {
    if left.dim() == right.dim() {
        return None;
    }
    Some(format!(
        "matrices differ in size: {:?} and {:?}",
        left.dim(),
        right.dim()
    ))
}

/// Two named factors and how far they are from reproducing the input.
struct Factors {
    first: (&'static str, Array2<f64>),
    second: (&'static str, Array2<f64>),
    residual: f64,
}

fn factorize(a: &Array2<f64>, form: Factorization, tol: f64) -> Result<Factors> {
    linalg::ensure_square(a)?;
    let factors = match form {
        Factorization::QrGivens => {
            let (q, r) = linalg::qr_givens(a);
            let residual = max_abs(&(a - &q.dot(&r)));
            Factors { first: ("Q", q), second: ("R", r), residual }
        }
        Factorization::QrHouseholder => {
            let (q, r) = linalg::qr_householder(a);
            let residual = max_abs(&(a - &q.dot(&r)));
            Factors { first: ("Q", q), second: ("R", r), residual }
        }
        Factorization::Tridiagonal => {
            let (t, q) = linalg::tridiagonalize(a, tol)?;
            let residual = max_abs(&(&q.t().dot(a).dot(&q) - &t));
            Factors { first: ("T", t), second: ("Q", q), residual }
        }
        Factorization::Hessenberg => {
            let (h, q) = linalg::hessenberg(a);
            let residual = max_abs(&(&q.t().dot(a).dot(&q) - &h));
            Factors { first: ("H", h), second: ("Q", q), residual }
        }
    };
    Ok(factors)
}

fn factor(args: FactorArgs, out: &mut impl Write) -> Result<()> {
    let precision = args.numeric.precision;
    let a = solver::load_matrix(&args.path)?;
    let factors = factorize(&a, args.form, args.numeric.tolerance)?;
    log::info!("{} residual: {:e}", args.form, factors.residual);

    let (name, m) = &factors.first;
    write!(out, "{} =\n{}", name, Matrix::new(m, precision))?;
    let (name, m) = &factors.second;
    write!(out, "{} =\n{}", name, Matrix::new(m, precision))?;
    Ok(())
}

fn expansion(args: ExpansionArgs, out: &mut impl Write) -> Result<()> {
    let config = args.config();
    let matrix = solver::load_matrix(&config.path)?;
    let e = solver::expansion(&matrix, args.degree, &config)?;
    writeln!(out, "{}", Spectrum::new(&e.values, config.precision))?;
    writeln!(out, "alpha = {}", round_to(e.alpha, config.precision))?;
    Ok(())
}

fn max_abs(a: &Array2<f64>) -> f64 {
    a.iter().fold(0.0, |m, x| m.max(x.abs()))
}
