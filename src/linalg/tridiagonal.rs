use ndarray::Array2;

use super::givens::Givens;
use super::householder::Householder;
use super::{ensure_square, frobenius_norm, is_symmetric};
use crate::error::{Result, SolverError};

/// Reduces a symmetric matrix to tridiagonal form `t = q^T * a * q`.
pub fn tridiagonalize(a: &Array2<f64>, tol: f64) -> Result<(Array2<f64>, Array2<f64>)> {
    ensure_square(a)?;
    if !is_symmetric(a, tol) {
        return Err(SolverError::NotSymmetric);
    }

    let n = a.nrows();
    let mut t = a.clone();
    let mut q = Array2::eye(n);
    for c in 0..n.saturating_sub(2) {
        if let Some(h) = Householder::annihilating(t.column(c), c + 1) {
            h.apply_left(&mut t);
            h.apply_right(&mut t);
            h.apply_right(&mut q);
            for i in c + 2..n {
                t[[i, c]] = 0.0;
                t[[c, i]] = 0.0;
            }
        }
    }
    Ok((t, q))
}

/// Eigenvalue of the trailing block `[[a, b], [b, c]]` closer to `c`.
pub fn wilkinson_shift(a: f64, b: f64, c: f64) -> f64 {
    let d = 0.5 * (a - c);
    if b == 0.0 {
        return c;
    }
    let sign = if d >= 0.0 { 1.0 } else { -1.0 };
    c - b * b / (d + sign * d.hypot(b))
}

/// Eigenvalues of a symmetric tridiagonal matrix by shifted QR with deflation.
///
/// The active block shrinks from the bottom each time its last sub-diagonal
/// entry drops below `tol` times the Frobenius norm of the input.
pub fn symmetric_eigenvalues(mut t: Array2<f64>, tol: f64, max_iterations: usize) -> Result<Vec<f64>> {
    ensure_square(&t)?;
    let n = t.nrows();
    let bound = tol * frobenius_norm(&t);
    let mut values = vec![0.0; n];

    let mut m = n;
    while m > 1 {
        let mut iterations = 0;
        while t[[m - 1, m - 2]].abs() > bound {
            if iterations == max_iterations {
                return Err(SolverError::NoConvergence {
                    method: "shifted QR",
                    iterations,
                });
            }
            iterations += 1;
            shifted_step(&mut t, m);
        }
        log::trace!("eigenvalue {} deflated after {} iterations", m - 1, iterations);
        values[m - 1] = t[[m - 1, m - 1]];
        m -= 1;
    }
    if n > 0 {
        values[0] = t[[0, 0]];
    }
    Ok(values)
}

/// One explicit QR step on the leading `m x m` block: `t <- R Q + mu I`.
fn shifted_step(t: &mut Array2<f64>, m: usize) {
    let mu = wilkinson_shift(t[[m - 2, m - 2]], t[[m - 1, m - 2]], t[[m - 1, m - 1]]);
    for k in 0..m {
        t[[k, k]] -= mu;
    }

    let mut rotations = Vec::with_capacity(m - 1);
    for c in 0..m - 1 {
        let g = Givens::new(c, c + 1, t[[c, c]], t[[c + 1, c]]);
        g.apply_left(t);
        t[[c + 1, c]] = 0.0;
        rotations.push(g);
    }
    for g in &rotations {
        g.apply_right_transpose(t);
    }

    for k in 0..m {
        t[[k, k]] += mu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::*;
    use ndarray::array;

    fn assert_tridiagonal(t: &Array2<f64>) {
        for i in 0..t.nrows() {
            for j in 0..t.ncols() {
                if i.abs_diff(j) > 1 {
                    assert_close!(t[[i, j]], 0.0, 1e-10);
                }
            }
        }
    }

    #[test]
    fn tridiagonalize_works() {
        let a = array![
            [1.0, 2.0, 3.0, 4.0, 5.0],
            [2.0, 2.0, 9.0, 16.0, 25.0],
            [3.0, 9.0, 16.0, 64.0, 125.0],
            [4.0, 16.0, 64.0, 256.0, 625.0],
            [5.0, 25.0, 125.0, 625.0, 3125.0]
        ];
        let (t, q) = tridiagonalize(&a, 1e-12).unwrap();
        assert_tridiagonal(&t);
        let back = q.t().dot(&a).dot(&q);
        assert_close!(back.as_slice().unwrap(), t.as_slice().unwrap(), 1e-8);
    }

    #[test]
    fn tridiagonalize_rejects_non_symmetric() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(matches!(tridiagonalize(&a, 1e-12), Err(SolverError::NotSymmetric)));
    }

    #[test]
    fn wilkinson_shift_picks_closer_eigenvalue() {
        // [[4, 1], [1, 1]] has eigenvalues (5 +- sqrt(13)) / 2
        assert_close!(wilkinson_shift(4.0, 1.0, 1.0), (5.0 - 13f64.sqrt()) / 2.0, 1e-12);
        assert_close!(wilkinson_shift(1.0, 1.0, 4.0), (5.0 + 13f64.sqrt()) / 2.0, 1e-12);
        // ties go to the lower eigenvalue
        assert_close!(wilkinson_shift(2.0, 1.0, 2.0), 1.0, 1e-12);
        assert_close!(wilkinson_shift(5.0, 0.0, 7.0), 7.0, 1e-12);
    }

    #[test]
    fn symmetric_eigenvalues_works() {
        let a = array![
            [1.0, 3.0, 3.0, 7.0],
            [3.0, 4.0, 0.0, 9.0],
            [3.0, 0.0, 0.0, 6.0],
            [7.0, 9.0, 6.0, 9.0]
        ];
        let (t, _) = tridiagonalize(&a, 1e-12).unwrap();
        let values = symmetric_eigenvalues(t, 1e-12, 100).unwrap();
        assert_eq!(values.len(), 4);
        let trace: f64 = values.iter().sum();
        assert_close!(trace, 14.0, 1e-8);
    }

    #[test]
    fn symmetric_eigenvalues_keeps_diagonal_exact() {
        let t = array![[3.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]];
        assert_eq!(symmetric_eigenvalues(t, 1e-12, 100).unwrap(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn symmetric_eigenvalues_splits_symmetric_pair() {
        let t = array![[0.0, 1.0], [1.0, 0.0]];
        let mut values = symmetric_eigenvalues(t, 1e-12, 100).unwrap();
        values.sort_by(SpectralOrder::spectral_cmp);
        assert_close!(values[..], [-1.0, 1.0][..], 1e-12);
    }
}
