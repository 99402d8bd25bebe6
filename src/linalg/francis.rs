use ndarray::Array2;
use num_complex::Complex64;

use super::householder::Householder;
use crate::error::{Result, SolverError};

/// Reduces a square matrix to upper Hessenberg form `h = q^T * a * q`.
pub fn hessenberg(a: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut h = a.clone();
    let mut q = Array2::eye(n);
    for c in 0..n.saturating_sub(2) {
        if let Some(r) = Householder::annihilating(h.column(c), c + 1) {
            r.apply_left(&mut h);
            r.apply_right(&mut h);
            r.apply_right(&mut q);
            for i in c + 2..n {
                h[[i, c]] = 0.0;
            }
        }
    }
    (h, q)
}

/// Eigenvalues of an upper Hessenberg matrix by Francis double-shift QR.
///
/// Real eigenvalues come out of 1x1 blocks, complex conjugate pairs out of
/// 2x2 blocks. An exceptional shift is taken every tenth iteration on the
/// same block; `max_iterations` bounds the iterations spent on one block.
pub fn francis_eigenvalues(mut h: Array2<f64>, max_iterations: usize) -> Result<Vec<Complex64>> {
    let n = h.nrows();
    let mut values = vec![Complex64::new(0.0, 0.0); n];

    let mut norm = 0.0;
    for i in 0..n {
        for j in i.saturating_sub(1)..n {
            norm += h[[i, j]].abs();
        }
    }

    // accumulated exceptional shifts
    let mut t = 0.0;
    let mut active = n;
    while active > 0 {
        let nn = active - 1;
        let mut its = 0;
        loop {
            let l = small_subdiagonal(&mut h, nn, norm);
            let mut x = h[[nn, nn]];
            if l == nn {
                values[nn] = Complex64::new(x + t, 0.0);
                active -= 1;
                break;
            }

            let mut y = h[[nn - 1, nn - 1]];
            let mut w = h[[nn, nn - 1]] * h[[nn - 1, nn]];
            if l == nn - 1 {
                let p = 0.5 * (y - x);
                let q = p * p + w;
                let z = q.abs().sqrt();
                x += t;
                if q >= 0.0 {
                    let z = if p >= 0.0 { p + z } else { p - z };
                    let lo = if z != 0.0 { x - w / z } else { x + z };
                    values[nn - 1] = Complex64::new(x + z, 0.0);
                    values[nn] = Complex64::new(lo, 0.0);
                } else {
                    values[nn - 1] = Complex64::new(x + p, -z);
                    values[nn] = Complex64::new(x + p, z);
                }
                active -= 2;
                break;
            }

            if its == max_iterations {
                return Err(SolverError::NoConvergence {
                    method: "Francis QR",
                    iterations: its,
                });
            }
            if its > 0 && its % 10 == 0 {
                t += x;
                for i in 0..=nn {
                    h[[i, i]] -= x;
                }
                let s = h[[nn, nn - 1]].abs() + h[[nn - 1, nn - 2]].abs();
                x = 0.75 * s;
                y = x;
                w = -0.4375 * s * s;
            }
            its += 1;
            double_shift_step(&mut h, l, nn, x, y, w);
        }
        log::trace!("deflated down to {} active rows", active);
    }

    Ok(values)
}

/// Index `l` of the top of the unreduced block ending at row `nn`.
/// The sub-diagonal entry above it is flushed to zero.
fn small_subdiagonal(h: &mut Array2<f64>, nn: usize, norm: f64) -> usize {
    let mut l = nn;
    while l > 0 {
        let mut s = h[[l - 1, l - 1]].abs() + h[[l, l]].abs();
        if s == 0.0 {
            s = norm;
        }
        if h[[l, l - 1]].abs() + s == s {
            h[[l, l - 1]] = 0.0;
            break;
        }
        l -= 1;
    }
    l
}

/// One implicit double-shift QR sweep on rows `l..=nn`. The shifts are the
/// eigenvalues of the trailing 2x2 block, passed as `x`, `y` (its diagonal)
/// and `w` (product of its off-diagonal entries).
fn double_shift_step(h: &mut Array2<f64>, l: usize, nn: usize, x: f64, y: f64, w: f64) {
    // look for two consecutive small sub-diagonal entries
    let mut m = nn - 2;
    let mut p: f64;
    let mut q: f64;
    let mut r: f64;
    loop {
        let z = h[[m, m]];
        let rr = x - z;
        let ss = y - z;
        p = (rr * ss - w) / h[[m + 1, m]] + h[[m, m + 1]];
        q = h[[m + 1, m + 1]] - z - rr - ss;
        r = h[[m + 2, m + 1]];
        let s = p.abs() + q.abs() + r.abs();
        p /= s;
        q /= s;
        r /= s;
        if m == l {
            break;
        }
        let u = h[[m, m - 1]].abs() * (q.abs() + r.abs());
        let v = p.abs() * (h[[m - 1, m - 1]].abs() + z.abs() + h[[m + 1, m + 1]].abs());
        if u + v == v {
            break;
        }
        m -= 1;
    }

    for i in m + 2..=nn {
        h[[i, i - 2]] = 0.0;
        if i != m + 2 {
            h[[i, i - 3]] = 0.0;
        }
    }

    let mut scale = 0.0;
    for k in m..nn {
        if k != m {
            p = h[[k, k - 1]];
            q = h[[k + 1, k - 1]];
            r = if k != nn - 1 { h[[k + 2, k - 1]] } else { 0.0 };
            scale = p.abs() + q.abs() + r.abs();
            if scale != 0.0 {
                p /= scale;
                q /= scale;
                r /= scale;
            }
        }

        let norm = (p * p + q * q + r * r).sqrt();
        let s = if p >= 0.0 { norm } else { -norm };
        if s == 0.0 {
            continue;
        }
        if k == m {
            if l != m {
                h[[k, k - 1]] = -h[[k, k - 1]];
            }
        } else {
            h[[k, k - 1]] = -s * scale;
        }

        p += s;
        let vx = p / s;
        let vy = q / s;
        let vz = r / s;
        q /= p;
        r /= p;

        // row transformation
        for j in k..=nn {
            let mut pp = h[[k, j]] + q * h[[k + 1, j]];
            if k != nn - 1 {
                pp += r * h[[k + 2, j]];
                h[[k + 2, j]] -= pp * vz;
            }
            h[[k + 1, j]] -= pp * vy;
            h[[k, j]] -= pp * vx;
        }

        // column transformation
        let last = nn.min(k + 3);
        for i in l..=last {
            let mut pp = vx * h[[i, k]] + vy * h[[i, k + 1]];
            if k != nn - 1 {
                pp += vz * h[[i, k + 2]];
                h[[i, k + 2]] -= pp * r;
            }
            h[[i, k + 1]] -= pp * q;
            h[[i, k]] -= pp;
        }
    }
}
