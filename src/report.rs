use std::fmt::{self, Display};

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Rounds to `precision` decimal places and folds `-0` into `0`.
///
/// A precision too large for `f64` leaves the value as is.
pub fn round_to(x: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = x * scale;
    let rounded = if scaled.is_finite() { scaled.round() / scale } else { x };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Eigenvalue sequence printed as `[a, b, ...]`.
///
/// Values whose imaginary parts all round to zero are shown as reals,
/// otherwise every entry is shown as `re+imi` / `re-imi`.
pub struct Spectrum<'a> {
    values: &'a [Complex64],
    precision: usize,
}

impl<'a> Spectrum<'a> {
    pub fn new(values: &'a [Complex64], precision: usize) -> Spectrum<'a> {
        Spectrum { values, precision }
    }

    pub fn is_real(&self) -> bool {
        self.values
            .iter()
            .all(|v| round_to(v.im, self.precision) == 0.0)
    }
}

impl Display for Spectrum<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let real = self.is_real();
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let re = round_to(v.re, self.precision);
            if real {
                write!(f, "{}", re)?;
            } else {
                let im = round_to(v.im, self.precision);
                let sign = if im < 0.0 { '-' } else { '+' };
                write!(f, "{}{}{}i", re, sign, im.abs())?;
            }
        }
        write!(f, "]")
    }
}

/// Real vector printed the same way as a real [`Spectrum`].
pub struct Vector<'a> {
    values: &'a Array1<f64>,
    precision: usize,
}

impl<'a> Vector<'a> {
    pub fn new(values: &'a Array1<f64>, precision: usize) -> Vector<'a> {
        Vector { values, precision }
    }
}

impl Display for Vector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", round_to(*v, self.precision))?;
        }
        write!(f, "]")
    }
}

/// Matrix printed one row per line, entries right-aligned per column.
pub struct Matrix<'a> {
    values: &'a Array2<f64>,
    precision: usize,
}

impl<'a> Matrix<'a> {
    pub fn new(values: &'a Array2<f64>, precision: usize) -> Matrix<'a> {
        Matrix { values, precision }
    }
}

impl Display for Matrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells = self.values.map(|&x| round_to(x, self.precision).to_string());
        let widths: Vec<usize> = cells
            .columns()
            .into_iter()
            .map(|col| col.iter().map(String::len).max().unwrap_or(0))
            .collect();
        for row in cells.rows() {
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>1$}", cell, widths[j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
