mod ops;
mod products;
mod solve;
mod util;

use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};

use thiserror::Error;

use crate::kernels;
use crate::traits::{LinalgScalar, Scalar};
use crate::vector::Vector;

/// Dimension mismatch error for fallible conversions.
///
/// Returned by [`Matrix::try_from_vec`] and by deserialization when the
/// element count does not match the declared shape.
///
/// ```
/// use denso::{DimensionMismatch, Matrix};
///
/// let err = Matrix::try_from_vec(2, 2, vec![1.0_f64, 2.0, 3.0]).unwrap_err();
/// assert_eq!(err, DimensionMismatch { expected: (2, 2), got: (1, 3) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .got.0, .got.1)]
pub struct DimensionMismatch {
    /// Expected `(rows, columns)`.
    pub expected: (usize, usize),
    /// Got `(rows, columns)`; a bare element count is reported as `1 x len`.
    pub got: (usize, usize),
}

/// Heap-allocated dense matrix in row-major order.
///
/// Shape is set at construction and never changes; the flat storage always
/// holds exactly `rows * columns` elements. Element `(i, j)` lives at
/// `i * columns + j`.
///
/// # Examples
///
/// ```
/// use denso::{Matrix, Vector};
///
/// let a = Matrix::from_vec(2, 2, vec![1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.shape(), (2, 2));
///
/// let y = a.mat_vec(&Vector::from_slice(&[1.0, 1.0]));
/// assert_eq!(y.as_slice(), &[3.0, 7.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawMatrix<T>", bound(deserialize = "T: serde::Deserialize<'de>"))
)]
pub struct Matrix<T> {
    rows: usize,
    columns: usize,
    elements: Vec<T>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<T> {
    rows: usize,
    columns: usize,
    elements: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = DimensionMismatch;

    fn try_from(raw: RawMatrix<T>) -> Result<Self, Self::Error> {
        Matrix::try_from_vec(raw.rows, raw.columns, raw.elements)
    }
}

// ── Constructors ────────────────────────────────────────────────────

/// `rows * columns`, panicking when the product does not fit `usize`.
#[inline]
#[track_caller]
fn element_count(rows: usize, columns: usize) -> usize {
    match rows.checked_mul(columns) {
        Some(n) => n,
        None => panic!("matrix dimensions {}x{} overflow usize", rows, columns),
    }
}

impl<T: Scalar> Matrix<T> {
    /// `rows x columns` matrix of zeros.
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::fill(rows, columns, T::zero())
    }

    /// `rows x columns` matrix filled with `value`.
    pub fn fill(rows: usize, columns: usize, value: T) -> Self {
        Self {
            rows,
            columns,
            elements: vec![value; element_count(rows, columns)],
        }
    }

    /// `n x n` identity.
    ///
    /// ```
    /// use denso::Matrix;
    /// let id = Matrix::<f64>::identity(3);
    /// assert_eq!(id[(0, 0)], 1.0);
    /// assert_eq!(id[(0, 1)], 0.0);
    /// assert_eq!(id[(2, 2)], 1.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.elements[i * n + i] = T::one();
        }
        m
    }

    /// Square matrix with `diagonal` on its diagonal and zeros elsewhere.
    pub fn diagonal(diagonal: &[T]) -> Self {
        let n = diagonal.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diagonal.iter().enumerate() {
            m.elements[i * n + i] = d;
        }
        m
    }

    /// Copy a row-major flat slice.
    ///
    /// Panics if `slice.len() != rows * columns`.
    pub fn from_slice(rows: usize, columns: usize, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            element_count(rows, columns),
            "slice length {} does not match {}x{} matrix",
            slice.len(),
            rows,
            columns,
        );
        Self {
            rows,
            columns,
            elements: slice.to_vec(),
        }
    }

    /// Stack equally long rows.
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut elements = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                columns,
                "row {} has length {}, expected {}",
                i,
                row.len(),
                columns
            );
            elements.extend_from_slice(row);
        }
        Self {
            rows: rows.len(),
            columns,
            elements,
        }
    }

    /// Place equally long columns side by side.
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::from_columns(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(m.shape(), (3, 2));
    /// assert_eq!(m[(0, 1)], 4.0);
    /// ```
    pub fn from_columns<C: AsRef<[T]>>(columns: &[C]) -> Self {
        let rows = columns.first().map_or(0, |c| c.as_ref().len());
        let n = columns.len();
        let mut elements = vec![T::zero(); element_count(rows, n)];
        for (j, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            assert_eq!(
                column.len(),
                rows,
                "column {} has length {}, expected {}",
                j,
                column.len(),
                rows
            );
            for (i, &v) in column.iter().enumerate() {
                elements[i * n + j] = v;
            }
        }
        Self {
            rows,
            columns: n,
            elements,
        }
    }
}

impl<T> Matrix<T> {
    /// Take ownership of row-major storage.
    ///
    /// Panics if `elements.len() != rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, elements: Vec<T>) -> Self {
        assert_eq!(
            elements.len(),
            element_count(rows, columns),
            "vec length {} does not match {}x{} matrix",
            elements.len(),
            rows,
            columns,
        );
        Self {
            rows,
            columns,
            elements,
        }
    }

    /// Fallible [`from_vec`](Matrix::from_vec).
    pub fn try_from_vec(rows: usize, columns: usize, elements: Vec<T>) -> Result<Self, DimensionMismatch> {
        if rows.checked_mul(columns) != Some(elements.len()) {
            return Err(DimensionMismatch {
                expected: (rows, columns),
                got: (1, elements.len()),
            });
        }
        Ok(Self {
            rows,
            columns,
            elements,
        })
    }

    /// Build a matrix by calling `f(row, column)` in row-major order.
    ///
    /// ```
    /// use denso::Matrix;
    /// let m = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    /// assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut elements = Vec::with_capacity(element_count(rows, columns));
        for i in 0..rows {
            for j in 0..columns {
                elements.push(f(i, j));
            }
        }
        Self {
            rows,
            columns,
            elements,
        }
    }

    /// Build a matrix by letting `init` write the row-major storage directly.
    ///
    /// # Safety
    ///
    /// `init` must initialize every element of the slice it receives.
    pub unsafe fn from_uninit_with(
        rows: usize,
        columns: usize,
        init: impl FnOnce(&mut [MaybeUninit<T>]),
    ) -> Self {
        let n = element_count(rows, columns);
        let mut elements = Vec::with_capacity(n);
        init(&mut elements.spare_capacity_mut()[..n]);
        elements.set_len(n);
        Self {
            rows,
            columns,
            elements,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Mutable row-major storage. The shape stays fixed.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Borrow row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows, "row {} out of range for {} rows", i, self.rows);
        &self.elements[i * self.columns..(i + 1) * self.columns]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.rows, "row {} out of range for {} rows", i, self.rows);
        &mut self.elements[i * self.columns..(i + 1) * self.columns]
    }

    /// Consume the matrix, returning its row-major storage.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

// ── In-place level-1 operations ─────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Overwrite `self` with `source`. Panics on shape mismatch.
    pub fn copy_from(&mut self, source: &Self) {
        kernels::assert_shape("copy destination", source.shape(), self.shape());
        T::backend().copy(source.as_slice(), self.as_mut_slice());
    }

    /// `self += alpha * other`. Panics on shape mismatch.
    pub fn add_multiplied(&mut self, other: &Self, alpha: T) {
        kernels::assert_shape("accumulation destination", other.shape(), self.shape());
        T::backend().axpy(alpha, other.as_slice(), self.as_mut_slice());
    }

    /// `self *= alpha`.
    pub fn scale(&mut self, alpha: T) {
        T::backend().scal(alpha, self.as_mut_slice());
    }

    /// Column `j` as a new vector.
    pub fn column(&self, j: usize) -> Vector<T> {
        assert!(j < self.columns, "column {} out of range for {} columns", j, self.columns);
        Vector::from_fn(self.rows, |i| self.elements[i * self.columns + j])
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.columns,
            "index ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.rows,
            self.columns
        );
        &self.elements[i * self.columns + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.columns,
            "index ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.rows,
            self.columns
        );
        &mut self.elements[i * self.columns + j]
    }
}
