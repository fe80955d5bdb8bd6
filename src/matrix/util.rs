use num_traits::Float;

use super::Matrix;
use crate::kernels;
use crate::traits::{LinalgScalar, Scalar};
use crate::vector::Vector;

impl<T: Scalar> Matrix<T> {
    /// Sum of diagonal elements (over `min(rows, columns)`).
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.rows.min(self.columns);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self.elements[i * self.columns + i];
        }
        sum
    }

    /// Diagonal as a vector.
    pub fn diagonal_vector(&self) -> Vector<T> {
        let n = self.rows.min(self.columns);
        Vector::from_fn(n, |i| self.elements[i * self.columns + i])
    }

    /// Transposed copy.
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0, 3.0]]);
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 1));
    /// assert_eq!(t[(2, 0)], 3.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.columns, self.rows, |i, j| {
            self.elements[j * self.columns + i]
        })
    }

    /// Overwrites every element with zero, keeping the shape and allocation.
    pub fn zero_elements(&mut self) {
        self.elements.fill(T::zero());
    }

    /// Hankel matrix with constant anti-diagonals.
    ///
    /// The result is `last_column.len() x first_row.len()`. The last element
    /// of `first_row` is the shared corner and must equal the first element
    /// of `last_column`.
    ///
    /// ```
    /// use denso::Matrix;
    /// let h = Matrix::hankel(&[1, 2, 3], &[3, 4]);
    /// assert_eq!(h, Matrix::from_rows(&[[1, 2, 3], [2, 3, 4]]));
    /// ```
    #[track_caller]
    pub fn hankel(first_row: &[T], last_column: &[T]) -> Self {
        assert!(
            first_row.last() == last_column.first(),
            "Hankel corner mismatch: first row ends with {:?}, last column starts with {:?}",
            first_row.last(),
            last_column.first()
        );
        let width = first_row.len();
        Self::from_fn(last_column.len(), width, |i, j| {
            let k = i + j;
            if k < width {
                first_row[k]
            } else {
                last_column[k + 1 - width]
            }
        })
    }

    /// Traces out every subsystem not listed in `keep`.
    ///
    /// `self` acts on the tensor product of spaces with the given
    /// `dimensions`, so it must be square with side `Π dimensions`. The kept
    /// subsystems stay in ascending order whatever the order of `keep`. An
    /// empty `keep` gives the `1 x 1` full trace.
    ///
    /// ```
    /// use denso::Matrix;
    /// let rho = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
    /// let sigma = Matrix::<f64>::identity(3);
    /// let reduced = rho.kronecker(&sigma).partial_trace(&[2, 3], &[0]);
    /// assert_eq!(reduced, Matrix::from_rows(&[[3.0, 6.0], [9.0, 12.0]]));
    /// ```
    #[track_caller]
    pub fn partial_trace(&self, dimensions: &[usize], keep: &[usize]) -> Self {
        let total: usize = dimensions.iter().product();
        assert!(
            self.rows == total && self.columns == total,
            "partial trace needs a {}x{} matrix for subsystems {:?}, got {}x{}",
            total,
            total,
            dimensions,
            self.rows,
            self.columns
        );
        for (n, &k) in keep.iter().enumerate() {
            assert!(k < dimensions.len(), "subsystem {} out of range for {} subsystems", k, dimensions.len());
            assert!(!keep[..n].contains(&k), "subsystem {} kept twice", k);
        }
        if keep.is_empty() {
            return Self::from_vec(1, 1, vec![self.trace()]);
        }

        let mut strides = vec![1; dimensions.len()];
        for i in (1..dimensions.len()).rev() {
            strides[i - 1] = strides[i] * dimensions[i];
        }
        let (kept, traced): (Vec<usize>, Vec<usize>) = (0..dimensions.len()).partition(|i| keep.contains(i));

        // flat offset of every multi-index over `subsystems`, last one fastest
        let offsets = |subsystems: &[usize]| -> Vec<usize> {
            let count: usize = subsystems.iter().map(|&s| dimensions[s]).product();
            (0..count)
                .map(|mut flat| {
                    let mut offset = 0;
                    for &s in subsystems.iter().rev() {
                        offset += (flat % dimensions[s]) * strides[s];
                        flat /= dimensions[s];
                    }
                    offset
                })
                .collect()
        };
        let rows = offsets(&kept);
        let shared = offsets(&traced);

        Self::from_fn(rows.len(), rows.len(), |i, j| {
            shared.iter().fold(T::zero(), |sum, &t| {
                sum + self.elements[(rows[i] + t) * total + rows[j] + t]
            })
        })
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Conjugated transposed copy (plain transpose for reals).
    pub fn conjugate_transpose(&self) -> Self {
        Self::from_fn(self.columns, self.rows, |i, j| {
            self.elements[j * self.columns + i].conj()
        })
    }

    /// `sqrt(Σ |a_ij|²)`.
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::from_rows(&[[3.0_f64, 0.0], [0.0, 4.0]]);
    /// assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        T::backend().nrm2(self.as_slice())
    }

    /// Element-wise `|a - b| <= max(absolute, relative * max(|a|, |b|))`.
    ///
    /// Shapes must agree; differently shaped matrices are never equal.
    ///
    /// ```
    /// use denso::Matrix;
    /// let a = Matrix::from_rows(&[[1.0, 2.0]]);
    /// let b = Matrix::from_rows(&[[1.0 + 1e-13, 2.0]]);
    /// assert!(a.is_approx_eq(&b, 1e-12, 0.0));
    /// assert!(!a.is_approx_eq(&b, 0.0, 0.0));
    /// ```
    pub fn is_approx_eq(&self, other: &Self, absolute: T::Real, relative: T::Real) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.elements.iter().zip(&other.elements).all(|(&a, &b)| {
            let scale = a.modulus().max(b.modulus());
            (a - b).modulus() <= absolute.max(relative * scale)
        })
    }

    // ── Kronecker ───────────────────────────────────────────────────

    /// Kronecker product `A ⊗ B` into a new matrix.
    ///
    /// ```
    /// use denso::Matrix;
    /// let a = Matrix::from_rows(&[[1.0, 2.0]]);
    /// let b = Matrix::from_rows(&[[1.0], [10.0]]);
    /// let k = a.kronecker(&b);
    /// assert_eq!(k.shape(), (2, 2));
    /// assert_eq!(k.as_slice(), &[1.0, 2.0, 10.0, 20.0]);
    /// ```
    pub fn kronecker(&self, other: &Self) -> Self {
        self.kronecker_scaled(other, T::one())
    }

    pub fn kronecker_scaled(&self, other: &Self, alpha: T) -> Self {
        let mut out = Self::zeros(self.rows * other.rows, self.columns * other.columns);
        self.kronecker_with(other, alpha, false, &mut out);
        out
    }

    pub fn kronecker_into(&self, other: &Self, into: &mut Self) {
        self.kronecker_with(other, T::one(), false, into);
    }

    pub fn kronecker_scaled_into(&self, other: &Self, alpha: T, into: &mut Self) {
        self.kronecker_with(other, alpha, false, into);
    }

    pub fn kronecker_adding_into(&self, other: &Self, into: &mut Self) {
        self.kronecker_with(other, T::one(), true, into);
    }

    pub fn kronecker_scaled_adding_into(&self, other: &Self, alpha: T, into: &mut Self) {
        self.kronecker_with(other, alpha, true, into);
    }

    #[track_caller]
    fn kronecker_with(&self, other: &Self, alpha: T, accumulate: bool, into: &mut Self) {
        kernels::assert_shape(
            "Kronecker destination",
            (self.rows * other.rows, self.columns * other.columns),
            into.shape(),
        );
        let out_cols = into.columns;
        for r in 0..self.rows {
            for s in 0..self.columns {
                let ars = alpha * self.elements[r * self.columns + s];
                for v in 0..other.rows {
                    let out_row = (other.rows * r + v) * out_cols + other.columns * s;
                    let b_row = other.row(v);
                    let dst = &mut into.elements[out_row..out_row + other.columns];
                    for (d, &b) in dst.iter_mut().zip(b_row) {
                        *d = if accumulate { ars.mul_add_relaxed(b, *d) } else { ars * b };
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn trace_rectangular() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.trace(), 6.0);
        assert_eq!(m.diagonal_vector().as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn zero_elements_keeps_shape() {
        let mut m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        m.zero_elements();
        assert_eq!(m, Matrix::zeros(2, 3));
    }

    #[test]
    fn hankel_anti_diagonals() {
        let h = Matrix::hankel(&[1.0, 2.0, 3.0], &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(h.shape(), (4, 3));
        assert_eq!(
            h,
            Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 3.0, 4.0], [3.0, 4.0, 5.0], [4.0, 5.0, 6.0]])
        );
        assert_eq!(Matrix::<f64>::hankel(&[], &[]).shape(), (0, 0));
    }

    #[test]
    #[should_panic(expected = "Hankel corner mismatch")]
    fn hankel_corner_mismatch() {
        Matrix::hankel(&[1, 2], &[3, 4]);
    }

    #[test]
    fn partial_trace_of_product_state() {
        let rho = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let sigma = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
        let joint = rho.kronecker(&sigma);

        assert_eq!(joint.partial_trace(&[2, 2], &[0]), &rho * 13.0_f64);
        assert_eq!(joint.partial_trace(&[2, 2], &[1]), &sigma * 5.0_f64);
        assert_eq!(joint.partial_trace(&[2, 2], &[1, 0]), joint);
        assert_eq!(joint.partial_trace(&[2, 2], &[]), Matrix::from_vec(1, 1, vec![65.0]));
    }

    #[test]
    fn partial_trace_middle_subsystem() {
        let a = Matrix::from_rows(&[[1.0, -1.0], [2.0, 0.5]]);
        let b = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
        let c = Matrix::from_rows(&[[0.0, 1.0], [1.0, 3.0]]);
        let joint = a.kronecker(&b.kronecker(&c));

        let reduced = joint.partial_trace(&[2, 3, 2], &[2, 0]);
        assert_eq!(reduced, a.kronecker_scaled(&c, b.trace()));
    }

    #[test]
    fn partial_trace_complex() {
        let rho = Matrix::from_rows(&[
            [Complex::new(0.5, 0.0), Complex::new(0.0, -0.5)],
            [Complex::new(0.0, 0.5), Complex::new(0.5, 0.0)],
        ]);
        let joint = Matrix::<Complex<f64>>::identity(2).kronecker(&rho);
        let reduced = joint.partial_trace(&[2, 2], &[1]);
        assert_eq!(reduced, &rho * Complex::new(2.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "subsystem 1 kept twice")]
    fn partial_trace_duplicate_subsystem() {
        Matrix::<f64>::identity(4).partial_trace(&[2, 2], &[1, 1]);
    }

    #[test]
    #[should_panic(expected = "partial trace needs a 6x6 matrix")]
    fn partial_trace_wrong_size() {
        Matrix::<f64>::identity(4).partial_trace(&[2, 3], &[0]);
    }

    #[test]
    fn transpose_twice() {
        let m = Matrix::from_fn(3, 4, |i, j| (i * 4 + j) as f64);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose()[(3, 2)], m[(2, 3)]);
    }

    #[test]
    fn conjugate_transpose_complex() {
        let m = Matrix::from_rows(&[[Complex::new(1.0, 2.0), Complex::new(3.0, -1.0)]]);
        let h = m.conjugate_transpose();
        assert_eq!(h.shape(), (2, 1));
        assert_eq!(h[(0, 0)], Complex::new(1.0, -2.0));
        assert_eq!(h[(1, 0)], Complex::new(3.0, 1.0));
    }

    #[test]
    fn frobenius_complex() {
        let m = Matrix::from_rows(&[[Complex::new(3.0_f64, 4.0)], [Complex::new(0.0, 0.0)]]);
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn approx_eq_shapes() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<f64>::zeros(1, 4);
        assert!(!a.is_approx_eq(&b, 1.0, 1.0));
        let c = Matrix::fill(2, 2, 100.0);
        let d = Matrix::fill(2, 2, 100.5);
        assert!(c.is_approx_eq(&d, 0.0, 1e-2));
        assert!(!c.is_approx_eq(&d, 0.0, 1e-3));
    }

    #[test]
    fn kronecker_forms() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::<f64>::identity(2);
        let k = a.kronecker(&b);
        assert_eq!(k.shape(), (4, 4));
        assert_eq!(k[(0, 0)], 1.0);
        assert_eq!(k[(1, 1)], 1.0);
        assert_eq!(k[(0, 2)], 2.0);
        assert_eq!(k[(3, 1)], 3.0);
        assert_eq!(k[(2, 3)], 0.0);

        let mut acc = k.clone();
        a.kronecker_scaled_adding_into(&b, -1.0, &mut acc);
        assert!(acc.as_slice().iter().all(|&v| v == 0.0));

        a.kronecker_adding_into(&b, &mut acc);
        assert_eq!(acc, k);

        a.kronecker_scaled_into(&b, 2.0, &mut acc);
        assert_eq!(acc[(1, 3)], 4.0);

        a.kronecker_into(&b, &mut acc);
        assert_eq!(acc, k);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch for Kronecker destination")]
    fn kronecker_wrong_destination() {
        let a = Matrix::<f64>::identity(2);
        let mut out = Matrix::zeros(3, 3);
        a.kronecker_into(&a, &mut out);
    }
}
