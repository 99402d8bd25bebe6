//! Eigenvalue algorithms and the orthogonal transforms they are built from.

use ndarray::Array2;
use num_complex::Complex64;

use crate::config::{Method, SolverConfig};
use crate::error::{Result, SolverError};

pub mod francis;
pub mod givens;
pub mod householder;
pub mod lapack;
pub mod power;
pub mod qr;
pub mod tridiagonal;

pub use francis::{francis_eigenvalues, hessenberg};
pub use givens::qr_givens;
pub use householder::qr_householder;
pub use lapack::lapack_eigenvalues;
pub use power::power_iteration;
pub use qr::qr_iteration;
pub use tridiagonal::{symmetric_eigenvalues, tridiagonalize};

/// Computes the (unsorted) eigenvalues of `a` with the configured method.
pub fn eigenvalues(a: &Array2<f64>, config: &SolverConfig) -> Result<Vec<Complex64>> {
    ensure_square(a)?;
    log::debug!("decomposing {}x{} matrix with {}", a.nrows(), a.ncols(), config.method);

    match config.method {
        Method::Lapack => lapack_eigenvalues(a),
        Method::Francis => {
            let (h, _) = hessenberg(a);
            francis_eigenvalues(h, config.max_iterations)
        }
        Method::Symmetric => {
            let (t, _) = tridiagonalize(a, config.tolerance)?;
            let values = symmetric_eigenvalues(t, config.tolerance, config.max_iterations)?;
            Ok(values.into_iter().map(|x| Complex64::new(x, 0.0)).collect())
        }
        Method::Qr => {
            let values = qr_iteration(a, config.tolerance, config.max_iterations)?;
            Ok(values.into_iter().map(|x| Complex64::new(x, 0.0)).collect())
        }
    }
}

pub fn ensure_square(a: &Array2<f64>) -> Result<()> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(SolverError::NotSquare { rows, cols });
    }
    Ok(())
}

/// Frobenius norm, used as the scale for absolute tolerances.
pub fn frobenius_norm(a: &Array2<f64>) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

pub fn is_symmetric(a: &Array2<f64>, tol: f64) -> bool {
    let n = a.nrows();
    if n != a.ncols() {
        return false;
    }
    let bound = tol * frobenius_norm(a);
    for i in 0..n {
        for j in i + 1..n {
            if (a[[i, j]] - a[[j, i]]).abs() > bound {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::*;
    use ndarray::array;

    fn sorted(mut v: Vec<Complex64>) -> Vec<Complex64> {
        v.sort_by(SpectralOrder::spectral_cmp);
        v
    }

    #[test]
    fn every_method_agrees_on_symmetric_input() {
        let a = array![
            [1.0, 3.0, 3.0, 7.0],
            [3.0, 4.0, 0.0, 9.0],
            [3.0, 0.0, 0.0, 6.0],
            [7.0, 9.0, 6.0, 9.0]
        ];
        let reference = sorted(lapack_eigenvalues(&a).unwrap());
        for method in [Method::Francis, Method::Symmetric, Method::Qr] {
            let config = SolverConfig::default().with_method(method);
            let values = sorted(eigenvalues(&a, &config).unwrap());
            assert_close!(values[..], reference[..], 1e-6);
        }
    }

    #[test]
    fn non_square_is_rejected_by_every_method() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        for method in [Method::Lapack, Method::Francis, Method::Symmetric, Method::Qr] {
            let config = SolverConfig::default().with_method(method);
            assert!(matches!(
                eigenvalues(&a, &config),
                Err(SolverError::NotSquare { rows: 2, cols: 3 })
            ));
        }
    }

    #[test]
    fn is_symmetric_works() {
        assert!(is_symmetric(&array![[1.0, 2.0], [2.0, 5.0]], 1e-12));
        assert!(!is_symmetric(&array![[1.0, 2.0], [3.0, 5.0]], 1e-12));
        assert!(!is_symmetric(&array![[1.0, 2.0, 3.0], [2.0, 5.0, 6.0]], 1e-12));
    }
}
