use super::Matrix;
use crate::kernels;
use crate::traits::LinalgScalar;
use crate::vector::Vector;

/// Fixed-iteration stationary solvers for `A x = b`.
///
/// Neither solver checks convergence. Rows with a zero diagonal entry are
/// skipped, leaving that component of the iterate unchanged.
impl<T: LinalgScalar> Matrix<T> {
    /// Gauss-Seidel sweeps, updating `x` in place. On entry `x` holds the
    /// initial guess.
    ///
    /// ```
    /// use denso::{Matrix, Vector};
    /// let a = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]);
    /// let b = Vector::from_slice(&[1.0, 2.0]);
    /// let mut x = Vector::<f64>::zeros(2);
    /// a.solve_gauss_seidel_in_place(&b, &mut x, 50);
    /// assert!((x[0] - 1.0 / 11.0).abs() < 1e-12);
    /// assert!((x[1] - 7.0 / 11.0).abs() < 1e-12);
    /// ```
    #[track_caller]
    pub fn solve_gauss_seidel_in_place(&self, b: &Vector<T>, x: &mut Vector<T>, iterations: usize) {
        self.check_system(b, x);
        let n = self.rows;
        for _ in 0..iterations {
            for i in 0..n {
                let row = self.row(i);
                let aii = row[i];
                if aii.is_zero() {
                    continue;
                }
                let mut acc = b[i];
                for j in (0..n).filter(|&j| j != i) {
                    acc = acc - row[j] * x[j];
                }
                x[i] = acc / aii;
            }
        }
    }

    /// Gauss-Seidel starting from `initial_guess`.
    pub fn solve_gauss_seidel(&self, b: &Vector<T>, initial_guess: &Vector<T>, iterations: usize) -> Vector<T> {
        let mut x = initial_guess.clone();
        self.solve_gauss_seidel_in_place(b, &mut x, iterations);
        x
    }

    /// Jacobi iterations, updating `x` in place. On entry `x` holds the
    /// initial guess. Uses one scratch vector of the same length.
    #[track_caller]
    pub fn solve_jacobi_in_place(&self, b: &Vector<T>, x: &mut Vector<T>, iterations: usize) {
        self.check_system(b, x);
        let n = self.rows;
        let mut next = x.clone();
        for _ in 0..iterations {
            for i in 0..n {
                let row = self.row(i);
                let aii = row[i];
                if aii.is_zero() {
                    next[i] = x[i];
                    continue;
                }
                let mut off = T::zero();
                for j in (0..n).filter(|&j| j != i) {
                    off = row[j].mul_add_relaxed(x[j], off);
                }
                next[i] = (b[i] - off) / aii;
            }
            x.swap_with(&mut next);
        }
    }

    /// Jacobi starting from `initial_guess`.
    pub fn solve_jacobi(&self, b: &Vector<T>, initial_guess: &Vector<T>, iterations: usize) -> Vector<T> {
        let mut x = initial_guess.clone();
        self.solve_jacobi_in_place(b, &mut x, iterations);
        x
    }

    #[track_caller]
    fn check_system(&self, b: &Vector<T>, x: &Vector<T>) {
        kernels::assert_square("system matrix", self.shape());
        kernels::assert_len("right-hand side", self.rows, b.len());
        kernels::assert_len("solution", self.rows, x.len());
    }
}
