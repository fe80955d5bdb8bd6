use super::Matrix;
use crate::backend::Side;
use crate::kernels;
use crate::traits::LinalgScalar;
use crate::vector::Vector;

// ── Matrix · Vector ─────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// `A x` into a new vector.
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    /// let y = a.mat_vec(&Vector::from_slice(&[1.0, -1.0]));
    /// assert_eq!(y.as_slice(), &[-1.0, -1.0, -1.0]);
    /// ```
    pub fn mat_vec(&self, x: &Vector<T>) -> Vector<T> {
        self.mat_vec_scaled(x, T::one())
    }

    /// `alpha A x` into a new vector.
    pub fn mat_vec_scaled(&self, x: &Vector<T>, alpha: T) -> Vector<T> {
        let mut y = Vector::zeros(self.rows());
        self.mat_vec_scaled_into(x, alpha, &mut y);
        y
    }

    /// `into = A x`. Panics if `x.len() != columns` or `into.len() != rows`.
    pub fn mat_vec_into(&self, x: &Vector<T>, into: &mut Vector<T>) {
        kernels::mat_vec(T::backend(), T::one(), self, x, T::zero(), into);
    }

    /// `into = alpha A x`.
    pub fn mat_vec_scaled_into(&self, x: &Vector<T>, alpha: T, into: &mut Vector<T>) {
        kernels::mat_vec(T::backend(), alpha, self, x, T::zero(), into);
    }

    /// `into += A x`.
    pub fn mat_vec_adding_into(&self, x: &Vector<T>, into: &mut Vector<T>) {
        kernels::mat_vec(T::backend(), T::one(), self, x, T::one(), into);
    }

    /// `into += alpha A x`.
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    /// let a = Matrix::<f64>::identity(2);
    /// let mut y = Vector::from_slice(&[1.0, 1.0]);
    /// a.mat_vec_scaled_adding_into(&Vector::from_slice(&[2.0, 3.0]), 2.0, &mut y);
    /// assert_eq!(y.as_slice(), &[5.0, 7.0]);
    /// ```
    pub fn mat_vec_scaled_adding_into(&self, x: &Vector<T>, alpha: T, into: &mut Vector<T>) {
        kernels::mat_vec(T::backend(), alpha, self, x, T::one(), into);
    }
}

// ── Matrix · Matrix ─────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// `A B` into a new matrix.
    ///
    /// ```
    /// use denso::Matrix;
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    /// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
    /// let c = a.mat_mul(&b);
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn mat_mul(&self, other: &Self) -> Self {
        self.mat_mul_scaled(other, T::one())
    }

    /// `alpha A B` into a new matrix.
    pub fn mat_mul_scaled(&self, other: &Self, alpha: T) -> Self {
        let mut c = Self::zeros(self.rows(), other.columns());
        self.mat_mul_scaled_into(other, alpha, &mut c);
        c
    }

    /// `into = A B`.
    pub fn mat_mul_into(&self, other: &Self, into: &mut Self) {
        kernels::mat_mul(T::backend(), T::one(), self, other, T::zero(), into);
    }

    /// `into = alpha A B`.
    pub fn mat_mul_scaled_into(&self, other: &Self, alpha: T, into: &mut Self) {
        kernels::mat_mul(T::backend(), alpha, self, other, T::zero(), into);
    }

    /// `into += A B`.
    pub fn mat_mul_adding_into(&self, other: &Self, into: &mut Self) {
        kernels::mat_mul(T::backend(), T::one(), self, other, T::one(), into);
    }

    /// `into += alpha A B`.
    pub fn mat_mul_scaled_adding_into(&self, other: &Self, alpha: T, into: &mut Self) {
        kernels::mat_mul(T::backend(), alpha, self, other, T::one(), into);
    }
}

// ── Symmetric ───────────────────────────────────────────────────────

/// Products where `self` is symmetric. Only the upper triangle (diagonal
/// included) of `self` is read; whatever sits below the diagonal is ignored.
impl<T: LinalgScalar> Matrix<T> {
    /// `S x` into a new vector.
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    /// // Lower triangle is never read.
    /// let s = Matrix::from_rows(&[[2.0, 1.0], [f64::NAN, 3.0]]);
    /// let y = s.symmetric_mat_vec(&Vector::from_slice(&[1.0, 1.0]));
    /// assert_eq!(y.as_slice(), &[3.0, 4.0]);
    /// ```
    pub fn symmetric_mat_vec(&self, x: &Vector<T>) -> Vector<T> {
        self.symmetric_mat_vec_scaled(x, T::one())
    }

    pub fn symmetric_mat_vec_scaled(&self, x: &Vector<T>, alpha: T) -> Vector<T> {
        let mut y = Vector::zeros(self.rows());
        self.symmetric_mat_vec_scaled_into(x, alpha, &mut y);
        y
    }

    pub fn symmetric_mat_vec_into(&self, x: &Vector<T>, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), T::one(), self, x, T::zero(), into);
    }

    pub fn symmetric_mat_vec_scaled_into(&self, x: &Vector<T>, alpha: T, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), alpha, self, x, T::zero(), into);
    }

    pub fn symmetric_mat_vec_adding_into(&self, x: &Vector<T>, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), T::one(), self, x, T::one(), into);
    }

    pub fn symmetric_mat_vec_scaled_adding_into(&self, x: &Vector<T>, alpha: T, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), alpha, self, x, T::one(), into);
    }

    /// `S B` ([`Side::Left`]) or `B S` ([`Side::Right`]) into a new matrix.
    ///
    /// ```
    /// use denso::{Matrix, Side};
    /// let s = Matrix::from_rows(&[[1.0, 2.0], [0.0, 1.0]]);
    /// let b = Matrix::from_rows(&[[1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    /// let c = s.symmetric_mat_mul(Side::Left, &b);
    /// assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0, 2.0, 1.0, 3.0]);
    /// ```
    pub fn symmetric_mat_mul(&self, side: Side, other: &Self) -> Self {
        self.symmetric_mat_mul_scaled(side, other, T::one())
    }

    pub fn symmetric_mat_mul_scaled(&self, side: Side, other: &Self, alpha: T) -> Self {
        let mut c = Self::zeros(other.rows(), other.columns());
        self.symmetric_mat_mul_scaled_into(side, other, alpha, &mut c);
        c
    }

    pub fn symmetric_mat_mul_into(&self, side: Side, other: &Self, into: &mut Self) {
        kernels::symmetric_mat_mul(T::backend(), side, T::one(), self, other, T::zero(), into);
    }

    pub fn symmetric_mat_mul_scaled_into(&self, side: Side, other: &Self, alpha: T, into: &mut Self) {
        kernels::symmetric_mat_mul(T::backend(), side, alpha, self, other, T::zero(), into);
    }

    pub fn symmetric_mat_mul_adding_into(&self, side: Side, other: &Self, into: &mut Self) {
        kernels::symmetric_mat_mul(T::backend(), side, T::one(), self, other, T::one(), into);
    }

    pub fn symmetric_mat_mul_scaled_adding_into(
        &self,
        side: Side,
        other: &Self,
        alpha: T,
        into: &mut Self,
    ) {
        kernels::symmetric_mat_mul(T::backend(), side, alpha, self, other, T::one(), into);
    }
}

// ── Hermitian ───────────────────────────────────────────────────────

/// Products where `self` is Hermitian. Only the upper triangle of `self` is
/// read, and the imaginary part of its diagonal is taken as zero. For real
/// element types these coincide with the symmetric products.
impl<T: LinalgScalar> Matrix<T> {
    /// `H x` into a new vector.
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    /// use num_complex::Complex;
    ///
    /// let i = Complex::new(0.0_f64, 1.0);
    /// let one = Complex::new(1.0, 0.0);
    /// let h = Matrix::from_rows(&[[one, i], [Complex::new(9.0, 9.0), one]]);
    /// let y = h.hermitian_mat_vec(&Vector::from_slice(&[one, one]));
    /// assert_eq!(y.as_slice(), &[one + i, one - i]);
    /// ```
    pub fn hermitian_mat_vec(&self, x: &Vector<T>) -> Vector<T> {
        self.hermitian_mat_vec_scaled(x, T::one())
    }

    pub fn hermitian_mat_vec_scaled(&self, x: &Vector<T>, alpha: T) -> Vector<T> {
        let mut y = Vector::zeros(self.rows());
        self.hermitian_mat_vec_scaled_into(x, alpha, &mut y);
        y
    }

    pub fn hermitian_mat_vec_into(&self, x: &Vector<T>, into: &mut Vector<T>) {
        kernels::hermitian_mat_vec(T::backend(), T::one(), self, x, T::zero(), into);
    }

    pub fn hermitian_mat_vec_scaled_into(&self, x: &Vector<T>, alpha: T, into: &mut Vector<T>) {
        kernels::hermitian_mat_vec(T::backend(), alpha, self, x, T::zero(), into);
    }

    pub fn hermitian_mat_vec_adding_into(&self, x: &Vector<T>, into: &mut Vector<T>) {
        kernels::hermitian_mat_vec(T::backend(), T::one(), self, x, T::one(), into);
    }

    pub fn hermitian_mat_vec_scaled_adding_into(&self, x: &Vector<T>, alpha: T, into: &mut Vector<T>) {
        kernels::hermitian_mat_vec(T::backend(), alpha, self, x, T::one(), into);
    }

    /// `H B` ([`Side::Left`]) or `B H` ([`Side::Right`]) into a new matrix.
    pub fn hermitian_mat_mul(&self, side: Side, other: &Self) -> Self {
        self.hermitian_mat_mul_scaled(side, other, T::one())
    }

    pub fn hermitian_mat_mul_scaled(&self, side: Side, other: &Self, alpha: T) -> Self {
        let mut c = Self::zeros(other.rows(), other.columns());
        self.hermitian_mat_mul_scaled_into(side, other, alpha, &mut c);
        c
    }

    pub fn hermitian_mat_mul_into(&self, side: Side, other: &Self, into: &mut Self) {
        kernels::hermitian_mat_mul(T::backend(), side, T::one(), self, other, T::zero(), into);
    }

    pub fn hermitian_mat_mul_scaled_into(&self, side: Side, other: &Self, alpha: T, into: &mut Self) {
        kernels::hermitian_mat_mul(T::backend(), side, alpha, self, other, T::zero(), into);
    }

    pub fn hermitian_mat_mul_adding_into(&self, side: Side, other: &Self, into: &mut Self) {
        kernels::hermitian_mat_mul(T::backend(), side, T::one(), self, other, T::one(), into);
    }

    pub fn hermitian_mat_mul_scaled_adding_into(
        &self,
        side: Side,
        other: &Self,
        alpha: T,
        into: &mut Self,
    ) {
        kernels::hermitian_mat_mul(T::backend(), side, alpha, self, other, T::one(), into);
    }
}
