use ndarray::{Array1, Array2};
use rand::prelude::*;

use super::ensure_square;
use crate::config::SolverConfig;
use crate::error::{Result, SolverError};

/// Dominant eigenvalue with a unit eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct DominantPair {
    pub value: f64,
    pub vector: Array1<f64>,
    pub iterations: usize,
}

/// Power iteration from a random start vector seeded by `config.seed`.
///
/// Converges when `|Av - λv| < tol * max(1, |λ|)`. A start vector in the
/// kernel yields the eigenvalue 0 immediately.
pub fn power_iteration(a: &Array2<f64>, config: &SolverConfig) -> Result<DominantPair> {
    ensure_square(a)?;
    let n = a.nrows();
    if n == 0 {
        return Err(SolverError::NoConvergence {
            method: "power iteration",
            iterations: 0,
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut v: Array1<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    normalize(&mut v);

    for iteration in 1..=config.max_iterations {
        let mut next = a.dot(&v);
        if norm(&next) == 0.0 {
            return Ok(DominantPair {
                value: 0.0,
                vector: v,
                iterations: iteration,
            });
        }
        normalize(&mut next);
        v = next;

        let av = a.dot(&v);
        let value = v.dot(&av);
        let residual = norm(&(&av - &(&v * value)));
        if residual < config.tolerance * value.abs().max(1.0) {
            log::debug!("power iteration converged after {} steps", iteration);
            return Ok(DominantPair {
                value,
                vector: v,
                iterations: iteration,
            });
        }
    }

    Err(SolverError::NoConvergence {
        method: "power iteration",
        iterations: config.max_iterations,
    })
}

fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}

fn normalize(v: &mut Array1<f64>) {
    let n = norm(v);
    if n > 0.0 {
        *v /= n;
    }
}
