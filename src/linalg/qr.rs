use ndarray::Array2;

use super::givens::qr_givens;
use super::{ensure_square, frobenius_norm};
use crate::error::{Result, SolverError};

/// Unshifted QR iteration `A <- R Q`.
///
/// Stops once the strictly lower triangle is below `tol` times the norm of
/// `a`, reading the eigenvalues off the diagonal. Only converges for real
/// spectra with distinct magnitudes.
pub fn qr_iteration(a: &Array2<f64>, tol: f64, max_iterations: usize) -> Result<Vec<f64>> {
    ensure_square(a)?;
    let bound = tol * frobenius_norm(a);
    let mut current = a.clone();
    for iteration in 0..=max_iterations {
        if lower_magnitude(&current) <= bound {
            log::debug!("QR iteration converged after {} steps", iteration);
            return Ok(current.diag().to_vec());
        }
        if iteration == max_iterations {
            break;
        }
        let (q, r) = qr_givens(&current);
        current = r.dot(&q);
    }
    Err(SolverError::NoConvergence {
        method: "QR iteration",
        iterations: max_iterations,
    })
}

fn lower_magnitude(a: &Array2<f64>) -> f64 {
    let mut max = 0.0f64;
    for i in 1..a.nrows() {
        for j in 0..i {
            max = max.max(a[[i, j]].abs());
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::*;
    use ndarray::array;

    #[test]
    fn qr_iteration_works() {
        let a = array![[6.0, 5.0, 0.0], [5.0, 1.0, 4.0], [0.0, 4.0, 3.0]];
        let mut values = qr_iteration(&a, 1e-12, 5000).unwrap();
        values.sort_by(SpectralOrder::spectral_cmp);
        let expected = [-3.8649214745069553, 4.021759941158752, 9.843161533348198];
        assert_close!(values[..], expected[..], 1e-8);
    }

    #[test]
    fn qr_iteration_handles_upper_triangular_input() {
        let a = array![[1.0, 7.0], [0.0, 3.0]];
        assert_eq!(qr_iteration(&a, 1e-12, 10).unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn qr_iteration_fails_on_complex_spectrum() {
        let a = array![[0.0, -1.0], [1.0, 0.0]];
        assert!(matches!(
            qr_iteration(&a, 1e-12, 50),
            Err(SolverError::NoConvergence { iterations: 50, .. })
        ));
    }
}
