use std::cmp::Ordering;
use num_traits::Float;
use num_complex::Complex;

pub trait CloseEnough {
    fn close_enough(&self, other: &Self, tol: f64) -> bool;
}

impl CloseEnough for f64 {
    fn close_enough(&self, other: &Self, tol: f64) -> bool {
        let diff = (*self - *other).abs();
        diff < tol
    }
}

impl<T> CloseEnough for Complex<T>
where T: Float, f64: Into<T> {
    fn close_enough(&self, other: &Self, tol: f64) -> bool {
        let diff = (self.re - other.re).abs();
        let diff2 = (self.im - other.im).abs();
        diff < tol.into() && diff2 < tol.into()
    }
}

impl<T> CloseEnough for [T]
where T: CloseEnough {
    fn close_enough(&self, other: &Self, tol: f64) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter().zip(other).all(|(a, b)| a.close_enough(b, tol))
    }
}

macro_rules! assert_close {
    ($a:expr, $b:expr, $tol:expr) => {
        if !($a.close_enough(&$b, $tol)) {
            panic!("assertion failed: `(left == right)` \
                (left: `{:?}`, right: `{:?}`, tolerance: `{:?}`)",
                &$a, &$b, $tol);
        }
    };
    // Variation where tol is defaulted to 1e-5
    ($a:expr, $b:expr) => {
        assert_close!($a, $b, 1e-5);
    };
}

/// Total order used to sort spectra: real part first, then imaginary part.
///
/// Both parts are compared with IEEE 754 `totalOrder`, so NaN sorts last
/// and `-0.0` before `0.0`.
pub trait SpectralOrder {
    fn spectral_cmp(&self, other: &Self) -> Ordering;
}

impl SpectralOrder for f64 {
    fn spectral_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl SpectralOrder for Complex<f64> {
    fn spectral_cmp(&self, other: &Self) -> Ordering {
        self.re
            .total_cmp(&other.re)
            .then_with(|| self.im.total_cmp(&other.im))
    }
}

/// True when `values` is non-decreasing under [`SpectralOrder`].
#[cfg(test)]
pub fn is_spectrally_sorted<T: SpectralOrder>(values: &[T]) -> bool {
    values
        .windows(2)
        .all(|w| w[0].spectral_cmp(&w[1]) != Ordering::Greater)
}

macro_rules! assert_close_no {
    ($a: expr, $b: expr, $tol: expr) => {
        let mut a = $a.clone();
        a.sort_by(SpectralOrder::spectral_cmp);
        let mut b = $b.clone();
        b.sort_by(SpectralOrder::spectral_cmp);
        assert_close!(a, b, $tol);
    };
    // Variation where tol is defaulted to 1e-5
    ($a: expr, $b: expr) => {
        assert_close_no!($a, $b, 1e-5);
    };
}

#[allow(unused_imports)]
pub(crate) use assert_close;
#[allow(unused_imports)]
pub(crate) use assert_close_no;

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn close_enough_works() {
        assert!(1.0f64.close_enough(&0.95, 0.1));
        assert!(
            Complex64::new(0.0, 1.0)
                .close_enough(&Complex64::new(0.01, 0.99), 0.1)
        );

        assert!(
            vec![1.0f64, 2.0, 3.0].close_enough(
                &vec![1.05, 2.05, 2.95],
                0.1
            )
        );
        assert!(!vec![1.0f64, 2.0].close_enough(&vec![1.0, 2.0, 3.0], 0.1));
    }

    #[test]
    fn assert_close_works() {
        assert_close!(1.0f64, 0.95, 0.1);
        assert_close!(1.0f64, 0.9999999);
    }

    #[test]
    #[should_panic]
    fn assert_close_panic_1() {
        assert_close!(1.0f64, 0.95, 0.01);
    }

    #[test]
    #[should_panic]
    fn assert_close_panic_2() {
        assert_close!(1.0f64, 0.95);
    }

    #[test]
    fn assert_close_accepts_slices() {
        let values = vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, -1.0)];
        let expected = vec![Complex64::new(1.0, 1e-9), Complex64::new(2.0, -1.0)];
        assert_close!(values[..], expected[..], 1e-6);

        let reals = [1.0f64, 2.0, 3.0];
        assert_close!(reals[..], [1.0f64, 2.0, 3.0000001][..]);
    }

    #[test]
    #[should_panic(expected = "tolerance")]
    fn assert_close_reports_slices() {
        let values = [1.0f64, 2.0];
        assert_close!(values[..], [1.0f64, 2.5][..], 1e-3);
    }

    #[test]
    fn spectral_order_is_lexicographic() {
        let mut values = vec![
            Complex64::new(1.0, 2.0),
            Complex64::new(-1.0, 5.0),
            Complex64::new(1.0, -2.0),
            Complex64::new(0.0, 0.0),
        ];
        values.sort_by(SpectralOrder::spectral_cmp);
        assert_eq!(
            values,
            vec![
                Complex64::new(-1.0, 5.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, -2.0),
                Complex64::new(1.0, 2.0),
            ]
        );
        assert!(is_spectrally_sorted(&values));
    }

    #[test]
    fn spectral_order_puts_nan_last() {
        let mut values = vec![f64::NAN, 3.0f64, -2.0];
        values.sort_by(SpectralOrder::spectral_cmp);
        assert_eq!(values[..2], [-2.0, 3.0]);
        assert!(values[2].is_nan());
    }

    #[test]
    fn assert_close_no_ignores_order() {
        assert_close_no!(vec![3.0f64, 1.0, 2.0], vec![1.0f64, 2.0, 3.0000001]);
    }
}
