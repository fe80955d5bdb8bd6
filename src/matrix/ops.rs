use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex;

use super::Matrix;
use crate::traits::LinalgScalar;
use crate::vector::Vector;

#[inline]
fn minus_one<T: LinalgScalar>() -> T {
    T::zero() - T::one()
}

// ── Element-wise addition / subtraction ─────────────────────────────

impl<T: LinalgScalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} += {}x{}",
            self.rows, self.columns, rhs.rows, rhs.columns,
        );
        T::backend().axpy(T::one(), rhs.as_slice(), self.as_mut_slice());
    }
}

impl<T: LinalgScalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} -= {}x{}",
            self.rows, self.columns, rhs.rows, rhs.columns,
        );
        T::backend().axpy(minus_one(), rhs.as_slice(), self.as_mut_slice());
    }
}

impl<T: LinalgScalar> AddAssign for Matrix<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl<T: LinalgScalar> SubAssign for Matrix<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self -= &rhs;
    }
}

impl<T: LinalgScalar> Add<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn add(mut self, rhs: &Matrix<T>) -> Matrix<T> {
        self += rhs;
        self
    }
}

impl<T: LinalgScalar> Add for Matrix<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self + &rhs
    }
}

impl<T: LinalgScalar> Add<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: Matrix<T>) -> Matrix<T> {
        rhs + self
    }
}

impl<T: LinalgScalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.clone() + rhs
    }
}

impl<T: LinalgScalar> Sub<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn sub(mut self, rhs: &Matrix<T>) -> Matrix<T> {
        self -= rhs;
        self
    }
}

impl<T: LinalgScalar> Sub for Matrix<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self - &rhs
    }
}

impl<T: LinalgScalar> Sub<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: Matrix<T>) -> Matrix<T> {
        -rhs + self
    }
}

impl<T: LinalgScalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.clone() - rhs
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: LinalgScalar> Neg for Matrix<T> {
    type Output = Self;
    fn neg(mut self) -> Self {
        self.scale(minus_one());
        self
    }
}

impl<T: LinalgScalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;
    fn neg(self) -> Matrix<T> {
        -self.clone()
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: LinalgScalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

impl<T: LinalgScalar> DivAssign<T> for Matrix<T> {
    fn div_assign(&mut self, rhs: T) {
        self.scale(T::one() / rhs);
    }
}

impl<T: LinalgScalar> Mul<T> for Matrix<T> {
    type Output = Self;
    fn mul(mut self, rhs: T) -> Self {
        self *= rhs;
        self
    }
}

impl<T: LinalgScalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: T) -> Matrix<T> {
        self.clone() * rhs
    }
}

impl<T: LinalgScalar> Div<T> for Matrix<T> {
    type Output = Self;
    fn div(mut self, rhs: T) -> Self {
        self /= rhs;
        self
    }
}

impl<T: LinalgScalar> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;
    fn div(self, rhs: T) -> Matrix<T> {
        self.clone() / rhs
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, Complex<f32>, Complex<f64>);

// ── Products ────────────────────────────────────────────────────────

impl<T: LinalgScalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.mat_mul(rhs)
    }
}

impl<T: LinalgScalar> Mul for Matrix<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.mat_mul(&rhs)
    }
}

impl<T: LinalgScalar> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;
    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        self.mat_vec(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub_combinations() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_rows(&[[10.0, 20.0], [30.0, 40.0]]);

        let c = &a + &b;
        assert_eq!(c.as_slice(), &[11.0, 22.0, 33.0, 44.0]);
        assert_eq!(a.clone() + b.clone(), c);
        assert_eq!(&a + b.clone(), c);

        let d = &b - &a;
        assert_eq!(d.as_slice(), &[9.0, 18.0, 27.0, 36.0]);
        assert_eq!(&b - a.clone(), d);
        assert_eq!(b.clone() - a.clone(), d);

        let mut e = a.clone();
        e += &b;
        e -= b;
        assert_eq!(e, a);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch: 2x2 += 1x2")]
    fn add_mismatch() {
        let mut a = Matrix::<f64>::zeros(2, 2);
        a += &Matrix::zeros(1, 2);
    }

    #[test]
    fn neg_scale_div() {
        let a = Matrix::from_rows(&[[1.0_f64, -2.0]]);
        assert_eq!((-&a).as_slice(), &[-1.0, 2.0]);
        assert_eq!((&a * 3.0).as_slice(), &[3.0, -6.0]);
        assert_eq!((2.0_f64 * &a).as_slice(), &[2.0, -4.0]);
        assert_eq!((a / 2.0).as_slice(), &[0.5, -1.0]);
    }

    #[test]
    fn complex_scalar_lhs() {
        let i = Complex::new(0.0_f64, 1.0);
        let a = Matrix::from_rows(&[[i]]);
        assert_eq!((i * a)[(0, 0)], Complex::new(-1.0, 0.0));
    }

    #[test]
    fn product_operators() {
        let a = Matrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        let id = Matrix::identity(2);
        assert_eq!(&a * &id, a);
        let v = Vector::from_slice(&[1.0, 1.0]);
        assert_eq!((&a * &v).as_slice(), &[3.0, 7.0]);
    }
}
