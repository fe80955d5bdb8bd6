use super::Vector;
use crate::kernels;
use crate::matrix::Matrix;
use crate::traits::LinalgScalar;

// ── Vector · Vector ─────────────────────────────────────────────────

impl<T: LinalgScalar> Vector<T> {
    /// `Σ self[i] * other[i]`, without conjugation.
    ///
    /// For complex vectors this is not an inner product; use
    /// [`inner`](Vector::inner) for that.
    ///
    /// ```
    /// use denso::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> T {
        kernels::dot(T::backend(), self, other)
    }

    /// `Σ conj(self[i]) * other[i]`.
    ///
    /// ```
    /// use denso::Vector;
    /// use num_complex::Complex;
    /// let v = Vector::from_slice(&[Complex::new(0.0_f64, 1.0)]);
    /// assert_eq!(v.dot(&v), Complex::new(-1.0, 0.0));
    /// assert_eq!(v.inner(&v), Complex::new(1.0, 0.0));
    /// ```
    pub fn inner(&self, other: &Self) -> T {
        kernels::inner(T::backend(), self, other)
    }

    /// `selfᵀ M other`. `metric` must be `len(self) x len(other)`.
    pub fn dot_with_metric(&self, metric: &Matrix<T>, other: &Self) -> T {
        kernels::bilinear(self, metric, other, false)
    }

    /// `selfᴴ M other`.
    pub fn inner_with_metric(&self, metric: &Matrix<T>, other: &Self) -> T {
        kernels::bilinear(self, metric, other, true)
    }

    /// `self otherᵀ` as a new `len(self) x len(other)` matrix.
    ///
    /// ```
    /// use denso::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0]);
    /// let b = Vector::from_slice(&[3.0, 4.0, 5.0]);
    /// let m = a.outer(&b);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 2)], 10.0);
    /// ```
    pub fn outer(&self, other: &Self) -> Matrix<T> {
        let mut m = Matrix::zeros(self.len(), other.len());
        self.outer_into(other, &mut m);
        m
    }

    /// `into = self otherᵀ`.
    #[track_caller]
    pub fn outer_into(&self, other: &Self, into: &mut Matrix<T>) {
        kernels::assert_shape("outer product destination", (self.len(), other.len()), into.shape());
        for i in 0..self.len() {
            let xi = self.data[i];
            for (dst, &yj) in into.row_mut(i).iter_mut().zip(other.as_slice()) {
                *dst = xi * yj;
            }
        }
    }
}

// ── Vector · Matrix ─────────────────────────────────────────────────

impl<T: LinalgScalar> Vector<T> {
    /// `xᵀ A` into a new vector.
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    /// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// let y = Vector::from_slice(&[1.0, 1.0]).vec_mat(&a);
    /// assert_eq!(y.as_slice(), &[5.0, 7.0, 9.0]);
    /// ```
    pub fn vec_mat(&self, a: &Matrix<T>) -> Vector<T> {
        self.vec_mat_scaled(a, T::one())
    }

    pub fn vec_mat_scaled(&self, a: &Matrix<T>, alpha: T) -> Vector<T> {
        let mut y = Vector::zeros(a.columns());
        self.vec_mat_scaled_into(a, alpha, &mut y);
        y
    }

    /// `into = xᵀ A`. Panics if `len(x) != rows` or `len(into) != columns`.
    pub fn vec_mat_into(&self, a: &Matrix<T>, into: &mut Vector<T>) {
        kernels::vec_mat(T::backend(), T::one(), self, a, T::zero(), into);
    }

    pub fn vec_mat_scaled_into(&self, a: &Matrix<T>, alpha: T, into: &mut Vector<T>) {
        kernels::vec_mat(T::backend(), alpha, self, a, T::zero(), into);
    }

    pub fn vec_mat_adding_into(&self, a: &Matrix<T>, into: &mut Vector<T>) {
        kernels::vec_mat(T::backend(), T::one(), self, a, T::one(), into);
    }

    pub fn vec_mat_scaled_adding_into(&self, a: &Matrix<T>, alpha: T, into: &mut Vector<T>) {
        kernels::vec_mat(T::backend(), alpha, self, a, T::one(), into);
    }

    /// `xᵀ S` for symmetric `S`, reading only its upper triangle.
    pub fn vec_symmetric_mat(&self, s: &Matrix<T>) -> Vector<T> {
        self.vec_symmetric_mat_scaled(s, T::one())
    }

    pub fn vec_symmetric_mat_scaled(&self, s: &Matrix<T>, alpha: T) -> Vector<T> {
        let mut y = Vector::zeros(s.columns());
        self.vec_symmetric_mat_scaled_into(s, alpha, &mut y);
        y
    }

    pub fn vec_symmetric_mat_into(&self, s: &Matrix<T>, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), T::one(), s, self, T::zero(), into);
    }

    pub fn vec_symmetric_mat_scaled_into(&self, s: &Matrix<T>, alpha: T, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), alpha, s, self, T::zero(), into);
    }

    pub fn vec_symmetric_mat_adding_into(&self, s: &Matrix<T>, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), T::one(), s, self, T::one(), into);
    }

    pub fn vec_symmetric_mat_scaled_adding_into(&self, s: &Matrix<T>, alpha: T, into: &mut Vector<T>) {
        kernels::symmetric_mat_vec(T::backend(), alpha, s, self, T::one(), into);
    }

    /// `xᵀ H` for Hermitian `H`, reading only its upper triangle and the
    /// real part of its diagonal.
    ///
    /// ```
    /// use denso::{Complex, Matrix, Vector};
    /// let c = |re, im| Complex::new(re, im);
    /// // Lower triangle is never read.
    /// let h = Matrix::from_rows(&[[c(1.0_f64, 0.0), c(0.0, 1.0)], [c(9.0, 9.0), c(2.0, 0.0)]]);
    /// let x = Vector::from_slice(&[c(1.0, 0.0), c(0.0, 0.0)]);
    /// assert_eq!(x.vec_hermitian_mat(&h).as_slice(), &[c(1.0, 0.0), c(0.0, 1.0)]);
    /// ```
    pub fn vec_hermitian_mat(&self, h: &Matrix<T>) -> Vector<T> {
        self.vec_hermitian_mat_scaled(h, T::one())
    }

    pub fn vec_hermitian_mat_scaled(&self, h: &Matrix<T>, alpha: T) -> Vector<T> {
        let mut y = Vector::zeros(h.columns());
        self.vec_hermitian_mat_scaled_into(h, alpha, &mut y);
        y
    }

    pub fn vec_hermitian_mat_into(&self, h: &Matrix<T>, into: &mut Vector<T>) {
        kernels::hermitian_vec_mat(T::backend(), T::one(), self, h, T::zero(), into);
    }

    pub fn vec_hermitian_mat_scaled_into(&self, h: &Matrix<T>, alpha: T, into: &mut Vector<T>) {
        kernels::hermitian_vec_mat(T::backend(), alpha, self, h, T::zero(), into);
    }

    pub fn vec_hermitian_mat_adding_into(&self, h: &Matrix<T>, into: &mut Vector<T>) {
        kernels::hermitian_vec_mat(T::backend(), T::one(), self, h, T::one(), into);
    }

    pub fn vec_hermitian_mat_scaled_adding_into(&self, h: &Matrix<T>, alpha: T, into: &mut Vector<T>) {
        kernels::hermitian_vec_mat(T::backend(), alpha, self, h, T::one(), into);
    }
}
