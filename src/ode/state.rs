use num_complex::Complex;

use crate::matrix::Matrix;
use crate::traits::{FloatScalar, LinalgScalar};
use crate::vector::Vector;

/// A value an integrator can evolve in place.
///
/// Integrators clone the initial state once per scratch buffer at
/// construction and afterwards only call the two in-place operations below,
/// so a state whose operations don't allocate gives an allocation-free
/// `step()`.
///
/// Implemented for the four scalar element types, [`Vector`], [`Matrix`],
/// and for `Vec<S>` and `[S; N]` of any state `S`.
pub trait OdeState: Clone {
    /// Type of time, step size and stage coefficients.
    type Real: FloatScalar;

    /// Overwrite `self` with `source`. Shapes must agree.
    fn copy_from_state(&mut self, source: &Self);

    /// `self += h * k`. Shapes must agree.
    fn accumulate_scaled(&mut self, k: &Self, h: Self::Real);

    /// Whether `other` can be copied into `self`.
    fn same_shape(&self, other: &Self) -> bool;
}

macro_rules! impl_scalar_state {
    ($real:ty => $($t:ty),*) => {
        $(
            impl OdeState for $t {
                type Real = $real;

                #[inline]
                fn copy_from_state(&mut self, source: &Self) {
                    *self = *source;
                }

                #[inline]
                fn accumulate_scaled(&mut self, k: &Self, h: $real) {
                    *self = <$t as LinalgScalar>::from_real(h).mul_add_relaxed(*k, *self);
                }

                #[inline]
                fn same_shape(&self, _other: &Self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_scalar_state!(f32 => f32, Complex<f32>);
impl_scalar_state!(f64 => f64, Complex<f64>);

impl<T: LinalgScalar> OdeState for Vector<T> {
    type Real = T::Real;

    #[inline]
    fn copy_from_state(&mut self, source: &Self) {
        self.copy_from(source);
    }

    #[inline]
    fn accumulate_scaled(&mut self, k: &Self, h: T::Real) {
        self.add_multiplied(k, T::from_real(h));
    }

    #[inline]
    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len()
    }
}

impl<T: LinalgScalar> OdeState for Matrix<T> {
    type Real = T::Real;

    #[inline]
    fn copy_from_state(&mut self, source: &Self) {
        self.copy_from(source);
    }

    #[inline]
    fn accumulate_scaled(&mut self, k: &Self, h: T::Real) {
        self.add_multiplied(k, T::from_real(h));
    }

    #[inline]
    fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }
}

// ── Collections ─────────────────────────────────────────────────────

impl<S: OdeState> OdeState for Vec<S> {
    type Real = S::Real;

    fn copy_from_state(&mut self, source: &Self) {
        assert_eq!(self.len(), source.len(), "state length mismatch");
        for (dst, src) in self.iter_mut().zip(source) {
            dst.copy_from_state(src);
        }
    }

    fn accumulate_scaled(&mut self, k: &Self, h: S::Real) {
        assert_eq!(self.len(), k.len(), "state length mismatch");
        for (dst, ki) in self.iter_mut().zip(k) {
            dst.accumulate_scaled(ki, h);
        }
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same_shape(b))
    }
}

impl<S: OdeState, const N: usize> OdeState for [S; N] {
    type Real = S::Real;

    fn copy_from_state(&mut self, source: &Self) {
        for (dst, src) in self.iter_mut().zip(source) {
            dst.copy_from_state(src);
        }
    }

    fn accumulate_scaled(&mut self, k: &Self, h: S::Real) {
        for (dst, ki) in self.iter_mut().zip(k) {
            dst.accumulate_scaled(ki, h);
        }
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.iter().zip(other).all(|(a, b)| a.same_shape(b))
    }
}
