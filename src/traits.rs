use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

use crate::backend::{self, NumericBackend};
use crate::kernels::ReferenceBackend;

/// Trait for types that can be stored in a [`Vector`](crate::Vector) or
/// [`Matrix`](crate::Matrix).
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Real floating-point elements (`f32`, `f64`).
///
/// Used for time variables, step sizes, norms and tolerances.
pub trait FloatScalar: Float + LinalgScalar<Real = Self> {}

impl<T: Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Field capability required by every kernel.
///
/// Covers real floats and complex numbers. Beyond the ring operations
/// inherited from [`Scalar`], an element type supplies conjugation, its real
/// part and a relaxed multiply-add that is free to skip fusing.
///
/// [`backend`](LinalgScalar::backend) is the hook through which the four
/// concrete element types (`f32`, `f64`, `Complex<f32>`, `Complex<f64>`) reach
/// an accelerated CBLAS library. Any other type implementing this trait keeps
/// the default and runs on the [`ReferenceBackend`].
pub trait LinalgScalar: Scalar + Send + Sync + 'static {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// `|re| + |im|`, the magnitude BLAS uses for `asum` and `i?amax`.
    fn abs1(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// `self * a + b`, allowed to fuse or not.
    #[inline]
    fn mul_add_relaxed(self, a: Self, b: Self) -> Self {
        self * a + b
    }

    /// Backend serving kernels for this element type.
    #[inline]
    fn backend() -> &'static dyn NumericBackend<Self> {
        &ReferenceBackend
    }
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn abs1(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn from_real(r: $t) -> $t { r }

                #[inline]
                fn backend() -> &'static dyn NumericBackend<$t> {
                    backend::select::<$t>()
                }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

macro_rules! impl_linalg_scalar_complex {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for Complex<$t> {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { self.norm() }
                #[inline] fn abs1(self) -> $t { self.re.abs() + self.im.abs() }
                #[inline] fn conj(self) -> Self { Complex::conj(&self) }
                #[inline] fn re(self) -> $t { self.re }
                #[inline] fn from_real(r: $t) -> Self { Complex::new(r, 0.0) }

                #[inline]
                fn backend() -> &'static dyn NumericBackend<Self> {
                    backend::select::<Complex<$t>>()
                }
            }
        )*
    };
}

impl_linalg_scalar_complex!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_conj_is_identity() {
        assert_eq!(3.5_f64.conj(), 3.5);
        assert_eq!((-2.0_f32).modulus(), 2.0);
    }

    #[test]
    fn complex_helpers() {
        let z = Complex::new(3.0_f64, -4.0);
        assert_eq!(z.conj(), Complex::new(3.0, 4.0));
        assert_eq!(z.modulus(), 5.0);
        assert_eq!(z.abs1(), 7.0);
        assert_eq!(LinalgScalar::re(z), 3.0);
        assert_eq!(Complex::<f64>::from_real(2.0), Complex::new(2.0, 0.0));
    }

    #[test]
    fn relaxed_multiply_add() {
        assert_eq!(2.0_f64.mul_add_relaxed(3.0, 1.0), 7.0);
        let z = Complex::new(0.0_f32, 1.0);
        assert_eq!(z.mul_add_relaxed(z, Complex::new(1.0, 0.0)), Complex::new(0.0, 0.0));
    }
}
