use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex;

use super::Vector;
use crate::matrix::Matrix;
use crate::traits::LinalgScalar;

#[inline]
fn minus_one<T: LinalgScalar>() -> T {
    T::zero() - T::one()
}

// ── Element-wise addition / subtraction ─────────────────────────────

impl<T: LinalgScalar> AddAssign<&Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &Vector<T>) {
        assert_eq!(
            self.len(),
            rhs.len(),
            "dimension mismatch: {} += {}",
            self.len(),
            rhs.len()
        );
        T::backend().axpy(T::one(), rhs.as_slice(), self.as_mut_slice());
    }
}

impl<T: LinalgScalar> SubAssign<&Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &Vector<T>) {
        assert_eq!(
            self.len(),
            rhs.len(),
            "dimension mismatch: {} -= {}",
            self.len(),
            rhs.len()
        );
        T::backend().axpy(minus_one(), rhs.as_slice(), self.as_mut_slice());
    }
}

impl<T: LinalgScalar> AddAssign for Vector<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl<T: LinalgScalar> SubAssign for Vector<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self -= &rhs;
    }
}

impl<T: LinalgScalar> Add<&Vector<T>> for Vector<T> {
    type Output = Vector<T>;
    fn add(mut self, rhs: &Vector<T>) -> Vector<T> {
        self += rhs;
        self
    }
}

impl<T: LinalgScalar> Add for Vector<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self + &rhs
    }
}

impl<T: LinalgScalar> Add<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;
    fn add(self, rhs: &Vector<T>) -> Vector<T> {
        self.clone() + rhs
    }
}

impl<T: LinalgScalar> Sub<&Vector<T>> for Vector<T> {
    type Output = Vector<T>;
    fn sub(mut self, rhs: &Vector<T>) -> Vector<T> {
        self -= rhs;
        self
    }
}

impl<T: LinalgScalar> Sub for Vector<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self - &rhs
    }
}

impl<T: LinalgScalar> Sub<&Vector<T>> for &Vector<T> {
    type Output = Vector<T>;
    fn sub(self, rhs: &Vector<T>) -> Vector<T> {
        self.clone() - rhs
    }
}

impl<T: LinalgScalar> Neg for Vector<T> {
    type Output = Self;
    fn neg(mut self) -> Self {
        self.scale(minus_one());
        self
    }
}

impl<T: LinalgScalar> Neg for &Vector<T> {
    type Output = Vector<T>;
    fn neg(self) -> Vector<T> {
        -self.clone()
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: LinalgScalar> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

impl<T: LinalgScalar> DivAssign<T> for Vector<T> {
    fn div_assign(&mut self, rhs: T) {
        self.scale(T::one() / rhs);
    }
}

impl<T: LinalgScalar> Mul<T> for Vector<T> {
    type Output = Self;
    fn mul(mut self, rhs: T) -> Self {
        self *= rhs;
        self
    }
}

impl<T: LinalgScalar> Mul<T> for &Vector<T> {
    type Output = Vector<T>;
    fn mul(self, rhs: T) -> Vector<T> {
        self.clone() * rhs
    }
}

impl<T: LinalgScalar> Div<T> for Vector<T> {
    type Output = Self;
    fn div(mut self, rhs: T) -> Self {
        self /= rhs;
        self
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<Vector<$t>> for $t {
                type Output = Vector<$t>;
                fn mul(self, rhs: Vector<$t>) -> Vector<$t> {
                    rhs * self
                }
            }

            impl Mul<&Vector<$t>> for $t {
                type Output = Vector<$t>;
                fn mul(self, rhs: &Vector<$t>) -> Vector<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, Complex<f32>, Complex<f64>);

// ── xᵀ A ────────────────────────────────────────────────────────────

impl<T: LinalgScalar> Mul<&Matrix<T>> for &Vector<T> {
    type Output = Vector<T>;
    fn mul(self, rhs: &Matrix<T>) -> Vector<T> {
        self.vec_mat(rhs)
    }
}
