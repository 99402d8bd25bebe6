use ndarray::Array2;

/// Plane rotation acting on rows (or columns) `i` and `j`.
///
/// As a matrix `G` it is the identity except for
/// `G[i][i] = G[j][j] = c`, `G[i][j] = s`, `G[j][i] = -s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens {
    pub i: usize,
    pub j: usize,
    pub c: f64,
    pub s: f64,
}

impl Givens {
    /// Rotation sending `(a, b)` in rows `(i, j)` to `(hypot(a, b), 0)`.
    pub fn new(i: usize, j: usize, a: f64, b: f64) -> Givens {
        let r = a.hypot(b);
        if r == 0.0 {
            Givens { i, j, c: 1.0, s: 0.0 }
        } else {
            Givens { i, j, c: a / r, s: b / r }
        }
    }

    /// `a <- G * a`
    pub fn apply_left(&self, a: &mut Array2<f64>) {
        for k in 0..a.ncols() {
            let x = a[[self.i, k]];
            let y = a[[self.j, k]];
            a[[self.i, k]] = self.c * x + self.s * y;
            a[[self.j, k]] = -self.s * x + self.c * y;
        }
    }

    /// `a <- a * G^T`
    pub fn apply_right_transpose(&self, a: &mut Array2<f64>) {
        for k in 0..a.nrows() {
            let x = a[[k, self.i]];
            let y = a[[k, self.j]];
            a[[k, self.i]] = self.c * x + self.s * y;
            a[[k, self.j]] = -self.s * x + self.c * y;
        }
    }
}

/// QR decomposition by Givens rotations: `a = q * r`.
pub fn qr_givens(a: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut r = a.clone();
    let mut qt = Array2::eye(n);
    for c in 0..a.ncols().min(n) {
        for i in c + 1..n {
            if r[[i, c]] == 0.0 {
                continue;
            }
            let g = Givens::new(c, i, r[[c, c]], r[[i, c]]);
            g.apply_left(&mut r);
            g.apply_left(&mut qt);
            r[[i, c]] = 0.0;
        }
    }
    (qt.reversed_axes(), r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::*;
    use ndarray::array;

    fn assert_upper_triangular(r: &Array2<f64>) {
        for i in 0..r.nrows() {
            for j in 0..i.min(r.ncols()) {
                assert_close!(r[[i, j]], 0.0, 1e-12);
            }
        }
    }

    #[test]
    fn rotation_zeroes_second_entry() {
        let mut a = array![[6.0, 5.0, 0.0], [5.0, 1.0, 4.0], [0.0, 4.0, 3.0]];
        let g = Givens::new(0, 1, 6.0, 5.0);
        g.apply_left(&mut a);
        assert_close!(a[[0, 0]], 61f64.sqrt());
        assert_close!(a[[1, 0]], 0.0);
    }

    #[test]
    fn rotation_is_orthogonal() {
        let g = Givens::new(0, 2, 3.0, 4.0);
        let mut m = Array2::<f64>::eye(3);
        g.apply_left(&mut m);
        let mut a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]];
        let expected = a.dot(&m.t());
        g.apply_right_transpose(&mut a);
        assert_close!(a.as_slice().unwrap(), expected.as_slice().unwrap(), 1e-12);
        g.apply_right_transpose(&mut m);
        let eye = Array2::<f64>::eye(3);
        assert_close!(m.as_slice().unwrap(), eye.as_slice().unwrap(), 1e-12);
    }

    #[test]
    fn qr_givens_works() {
        let a = array![
            [1.0, 3.0, 3.0, 7.0],
            [2.0, 4.0, 0.0, 9.0],
            [1.0, 3.0, 0.0, 6.0],
            [6.0, 9.0, 6.0, 9.0]
        ];
        let (q, r) = qr_givens(&a);
        assert_upper_triangular(&r);
        let qr = q.dot(&r);
        assert_close!(qr.as_slice().unwrap(), a.as_slice().unwrap(), 1e-10);
        let qtq = q.t().dot(&q);
        let eye = Array2::<f64>::eye(4);
        assert_close!(qtq.as_slice().unwrap(), eye.as_slice().unwrap(), 1e-12);
    }

    #[test]
    fn qr_givens_handles_zero_pivots() {
        let a = array![
            [0.0, 0.0, 0.0, 1.0, 1.0],
            [0.0, 2.0, 0.0, 0.0, 0.0],
            [1.0, 4.0, 4.0, 5.0, 7.0],
            [6.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 5.0, 9.0]
        ];
        let (q, r) = qr_givens(&a);
        assert_upper_triangular(&r);
        let qr = q.dot(&r);
        assert_close!(qr.as_slice().unwrap(), a.as_slice().unwrap(), 1e-10);
    }
}
