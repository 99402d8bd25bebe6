use ndarray::{Array1, Array2, ArrayView1};

/// Reflector `H = I - 2 v v^T` for a unit vector `v`.
#[derive(Debug, Clone, PartialEq)]
pub struct Householder {
    v: Array1<f64>,
}

impl Householder {
    /// Reflector along `v`; `None` for the zero vector.
    pub fn new(v: Array1<f64>) -> Option<Householder> {
        let norm = v.dot(&v).sqrt();
        if norm == 0.0 {
            return None;
        }
        Some(Householder { v: v / norm })
    }

    /// Reflector that maps `x` onto a multiple of `e_k`, looking only at
    /// `x[k..]`. Returns `None` if `x[k+1..]` is already zero.
    pub fn annihilating(x: ArrayView1<f64>, k: usize) -> Option<Householder> {
        let n = x.len();
        if k + 1 >= n || x.iter().skip(k + 1).all(|&e| e == 0.0) {
            return None;
        }

        let mut v = Array1::zeros(n);
        for i in k..n {
            v[i] = x[i];
        }
        let norm = v.dot(&v).sqrt();
        // reflect away from x to avoid cancellation in v[k]
        let alpha = if x[k] >= 0.0 { -norm } else { norm };
        v[k] -= alpha;
        Householder::new(v)
    }

    /// `a <- H * a`
    pub fn apply_left(&self, a: &mut Array2<f64>) {
        let w = self.v.dot(&*a);
        for i in 0..a.nrows() {
            let vi = 2.0 * self.v[i];
            if vi == 0.0 {
                continue;
            }
            for j in 0..a.ncols() {
                a[[i, j]] -= vi * w[j];
            }
        }
    }

    /// `a <- a * H`
    pub fn apply_right(&self, a: &mut Array2<f64>) {
        let w = a.dot(&self.v);
        for j in 0..a.ncols() {
            let vj = 2.0 * self.v[j];
            if vj == 0.0 {
                continue;
            }
            for i in 0..a.nrows() {
                a[[i, j]] -= w[i] * vj;
            }
        }
    }
}

/// QR decomposition by Householder reflections: `a = q * r`.
pub fn qr_householder(a: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut r = a.clone();
    let mut q = Array2::eye(n);
    for c in 0..a.ncols().min(n) {
        if let Some(h) = Householder::annihilating(r.column(c), c) {
            h.apply_left(&mut r);
            h.apply_right(&mut q);
            for i in c + 1..n {
                r[[i, c]] = 0.0;
            }
        }
    }
    (q, r)
}
