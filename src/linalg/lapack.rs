use ndarray::Array2;
use ndarray_linalg::eig::EigVals;
use num_complex::Complex64;

use super::ensure_square;
use crate::error::Result;

/// General eigenvalues through LAPACK's `geev`.
pub fn lapack_eigenvalues(a: &Array2<f64>) -> Result<Vec<Complex64>> {
    ensure_square(a)?;
    if a.is_empty() {
        return Ok(Vec::new());
    }
    let eig = a.eigvals()?;
    Ok(eig.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use crate::math::*;
    use ndarray::array;

    #[test]
    fn lapack_works() {
        let a = array![[2.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, -1.0]];
        let values = lapack_eigenvalues(&a).unwrap();
        let expected = vec![
            Complex64::new(-1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(5.0, 0.0),
        ];
        assert_close_no!(values, expected);
    }

    #[test]
    fn lapack_rejects_non_square() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(matches!(lapack_eigenvalues(&a), Err(SolverError::NotSquare { .. })));
    }
}
