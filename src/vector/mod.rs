mod ops;
mod products;

use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};

use crate::kernels;
use crate::traits::{LinalgScalar, Scalar};

/// Heap-allocated dense vector with a fixed length.
///
/// The length is set at construction and never changes. Element access
/// panics when out of range.
///
/// # Examples
///
/// ```
/// use denso::Vector;
///
/// let v = Vector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.dot(&v), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector<T> {
    data: Vec<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Zero vector of length `n`.
    ///
    /// ```
    /// use denso::Vector;
    /// let v = Vector::<f64>::zeros(4);
    /// assert_eq!(v.len(), 4);
    /// assert_eq!(v[3], 0.0);
    /// ```
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }

    /// Vector of length `n` filled with `value`.
    pub fn fill(n: usize, value: T) -> Self {
        Self {
            data: vec![value; n],
        }
    }

    /// Copy elements from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<T> Vector<T> {
    /// Take ownership of a `Vec`.
    ///
    /// ```
    /// use denso::Vector;
    /// let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(v[2], 3.0);
    /// ```
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Build a vector by calling `f(i)` for each index.
    ///
    /// ```
    /// use denso::Vector;
    /// let v = Vector::from_fn(4, |i| i as f64 * 0.5);
    /// assert_eq!(v[3], 1.5);
    /// ```
    pub fn from_fn(n: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..n).map(f).collect(),
        }
    }

    /// Build a vector by letting `init` write directly into uninitialized
    /// storage of length `n`, skipping any fill pass.
    ///
    /// # Safety
    ///
    /// `init` must initialize every element of the slice it receives.
    ///
    /// ```
    /// use denso::Vector;
    /// let v = unsafe {
    ///     Vector::from_uninit_with(3, |buf| {
    ///         for (i, slot) in buf.iter_mut().enumerate() {
    ///             slot.write(i as f64);
    ///         }
    ///     })
    /// };
    /// assert_eq!(v.as_slice(), &[0.0, 1.0, 2.0]);
    /// ```
    pub unsafe fn from_uninit_with(n: usize, init: impl FnOnce(&mut [MaybeUninit<T>])) -> Self {
        let mut data = Vec::with_capacity(n);
        init(&mut data.spare_capacity_mut()[..n]);
        data.set_len(n);
        Self { data }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Borrow the elements as a mutable slice. The length stays fixed.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Consume the vector, returning its storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

// ── In-place level-1 operations ─────────────────────────────────────

impl<T: LinalgScalar> Vector<T> {
    /// Overwrite `self` with the contents of `source`.
    ///
    /// Panics if the lengths differ.
    pub fn copy_from(&mut self, source: &Self) {
        kernels::copy(T::backend(), source.as_slice(), self.as_mut_slice());
    }

    /// `self += alpha * other`.
    ///
    /// ```
    /// use denso::Vector;
    /// let mut y = Vector::from_slice(&[1.0, 1.0]);
    /// y.add_multiplied(&Vector::from_slice(&[2.0, 4.0]), 0.5);
    /// assert_eq!(y.as_slice(), &[2.0, 3.0]);
    /// ```
    pub fn add_multiplied(&mut self, other: &Self, alpha: T) {
        kernels::axpy(T::backend(), alpha, other.as_slice(), self.as_mut_slice());
    }

    /// `self *= alpha`.
    pub fn scale(&mut self, alpha: T) {
        T::backend().scal(alpha, self.as_mut_slice());
    }

    /// Exchange contents with `other`. Panics if the lengths differ.
    pub fn swap_with(&mut self, other: &mut Self) {
        kernels::swap(T::backend(), self.as_mut_slice(), other.as_mut_slice());
    }

    /// Euclidean norm.
    ///
    /// ```
    /// use denso::Vector;
    /// let v = Vector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T::Real {
        T::backend().nrm2(self.as_slice())
    }

    /// Sum of `|re| + |im|` over all elements.
    pub fn abs_sum(&self) -> T::Real {
        T::backend().asum(self.as_slice())
    }

    /// Index of the first element with the largest `|re| + |im|`,
    /// `None` when empty.
    pub fn index_of_max_abs(&self) -> Option<usize> {
        T::backend().iamax(self.as_slice())
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(i < self.data.len(), "index {} out of range for vector of length {}", i, self.data.len());
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(i < self.data.len(), "index {} out of range for vector of length {}", i, self.data.len());
        &mut self.data[i]
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(v: Vector<T>) -> Self {
        v.data
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn usable_as_map_key() {
        use std::collections::HashMap;

        let mut counts = HashMap::new();
        for v in [[1, 0], [0, 1], [1, 0]] {
            *counts.entry(Vector::from_slice(&v)).or_insert(0) += 1;
        }
        assert_eq!(counts[&Vector::from_slice(&[1, 0])], 2);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn zeros_and_fill() {
        let z = Vector::<f64>::zeros(3);
        assert_eq!(z.as_slice(), &[0.0, 0.0, 0.0]);
        let f = Vector::fill(2, 7.0_f32);
        assert_eq!(f.as_slice(), &[7.0, 7.0]);
    }

    #[test]
    fn from_uninit_fills_every_slot() {
        let v = unsafe {
            Vector::from_uninit_with(5, |buf| {
                for (i, slot) in buf.iter_mut().enumerate() {
                    slot.write((i * i) as f64);
                }
            })
        };
        assert_eq!(v.as_slice(), &[0.0, 1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn from_uninit_empty() {
        let v: Vector<f64> = unsafe { Vector::from_uninit_with(0, |_| {}) };
        assert!(v.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_out_of_range() {
        let v = Vector::from_slice(&[1.0_f64, 2.0]);
        let _ = v[2];
    }

    #[test]
    fn index_mut() {
        let mut v = Vector::<f64>::zeros(2);
        v[1] = 5.0;
        assert_eq!(v[1], 5.0);
    }

    #[test]
    fn copy_and_accumulate() {
        let mut y = Vector::<f64>::zeros(3);
        let x = Vector::from_slice(&[1.0, 2.0, 3.0]);
        y.copy_from(&x);
        assert_eq!(y, x);
        y.add_multiplied(&x, 2.0);
        assert_eq!(y.as_slice(), &[3.0, 6.0, 9.0]);
        y.scale(-1.0);
        assert_eq!(y.as_slice(), &[-3.0, -6.0, -9.0]);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn copy_from_wrong_length() {
        let mut y = Vector::<f64>::zeros(2);
        y.copy_from(&Vector::zeros(3));
    }

    #[test]
    fn swap_with() {
        let mut a = Vector::from_slice(&[1.0_f32, 2.0]);
        let mut b = Vector::from_slice(&[3.0_f32, 4.0]);
        a.swap_with(&mut b);
        assert_eq!(a.as_slice(), &[3.0, 4.0]);
        assert_eq!(b.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn norms_and_argmax() {
        let v = Vector::from_slice(&[Complex::new(3.0_f64, 4.0), Complex::new(-1.0, 0.0)]);
        assert!((v.norm() - 26.0_f64.sqrt()).abs() < 1e-12);
        assert!((v.abs_sum() - 8.0).abs() < 1e-12);
        assert_eq!(v.index_of_max_abs(), Some(0));

        let r = Vector::from_slice(&[1.0_f64, -5.0, 5.0]);
        assert_eq!(r.index_of_max_abs(), Some(1));
        assert_eq!(Vector::<f64>::zeros(0).index_of_max_abs(), None);
    }

    #[test]
    fn collect_and_convert() {
        let v: Vector<f64> = (0..3).map(|i| i as f64).collect();
        let raw: Vec<f64> = v.clone().into();
        assert_eq!(raw, vec![0.0, 1.0, 2.0]);
        assert_eq!(Vector::from(raw), v);
    }
}
