//! Shape-checked kernel entry points.
//!
//! Each function takes the [`NumericBackend`] explicitly, asserts the
//! shapes of its operands and then dispatches. `Vector` and `Matrix`
//! methods call these with `T::backend()`; tests and benchmarks may pass
//! [`ReferenceBackend`] or an [`AcceleratedBackend`](crate::backend::AcceleratedBackend)
//! directly to compare paths.
//!
//! All products come as `y = alpha * op + beta * y`. The public container
//! methods map their four forms onto this:
//!
//! | form                   | alpha | beta |
//! |------------------------|-------|------|
//! | `_into`                | 1     | 0    |
//! | `_scaled_into`         | α     | 0    |
//! | `_adding_into`         | 1     | 1    |
//! | `_scaled_adding_into`  | α     | 1    |

pub(crate) mod reference;


pub use reference::ReferenceBackend;

use crate::backend::{NumericBackend, Side, Transpose};
use crate::matrix::Matrix;
use crate::traits::LinalgScalar;
use crate::vector::Vector;

// ── Assertions ──────────────────────────────────────────────────────

#[track_caller]
#[inline]
pub(crate) fn assert_len(what: &str, expected: usize, got: usize) {
    assert!(
        expected == got,
        "length mismatch for {}: expected {}, got {}",
        what,
        expected,
        got
    );
}

#[track_caller]
#[inline]
pub(crate) fn assert_shape(what: &str, expected: (usize, usize), got: (usize, usize)) {
    assert!(
        expected == got,
        "dimension mismatch for {}: expected {}x{}, got {}x{}",
        what,
        expected.0,
        expected.1,
        got.0,
        got.1
    );
}

#[track_caller]
#[inline]
pub(crate) fn assert_square(what: &str, shape: (usize, usize)) {
    assert!(
        shape.0 == shape.1,
        "dimension mismatch: {} must be square, got {}x{}",
        what,
        shape.0,
        shape.1
    );
}

// ── Level 1 ─────────────────────────────────────────────────────────

/// `Σ x[i] * y[i]`.
#[track_caller]
pub fn dot<T: LinalgScalar>(backend: &dyn NumericBackend<T>, x: &Vector<T>, y: &Vector<T>) -> T {
    assert_len("dot operand", x.len(), y.len());
    backend.dot(x.as_slice(), y.as_slice())
}

/// `Σ conj(x[i]) * y[i]`.
#[track_caller]
pub fn inner<T: LinalgScalar>(backend: &dyn NumericBackend<T>, x: &Vector<T>, y: &Vector<T>) -> T {
    assert_len("inner operand", x.len(), y.len());
    backend.dotc(x.as_slice(), y.as_slice())
}

/// `y += alpha * x` over flat buffers of equal length.
#[track_caller]
pub fn axpy<T: LinalgScalar>(backend: &dyn NumericBackend<T>, alpha: T, x: &[T], y: &mut [T]) {
    assert_len("axpy destination", x.len(), y.len());
    backend.axpy(alpha, x, y);
}

/// `y = x` over flat buffers of equal length.
#[track_caller]
pub fn copy<T: LinalgScalar>(backend: &dyn NumericBackend<T>, x: &[T], y: &mut [T]) {
    assert_len("copy destination", x.len(), y.len());
    backend.copy(x, y);
}

#[track_caller]
pub fn swap<T: LinalgScalar>(backend: &dyn NumericBackend<T>, x: &mut [T], y: &mut [T]) {
    assert_len("swap operand", x.len(), y.len());
    backend.swap(x, y);
}

// ── Level 2 ─────────────────────────────────────────────────────────

/// `y = alpha * A * x + beta * y`.
#[track_caller]
pub fn mat_vec<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    alpha: T,
    a: &Matrix<T>,
    x: &Vector<T>,
    beta: T,
    y: &mut Vector<T>,
) {
    assert_len("matrix-vector operand", a.columns(), x.len());
    assert_len("matrix-vector destination", a.rows(), y.len());
    backend.gemv(
        Transpose::NoTrans,
        a.rows(),
        a.columns(),
        alpha,
        a.as_slice(),
        x.as_slice(),
        beta,
        y.as_mut_slice(),
    );
}

/// `y = alpha * xᵀ A + beta * y`, computed as a transposed `gemv` without
/// copying `A`.
#[track_caller]
pub fn vec_mat<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    alpha: T,
    x: &Vector<T>,
    a: &Matrix<T>,
    beta: T,
    y: &mut Vector<T>,
) {
    assert_len("vector-matrix operand", a.rows(), x.len());
    assert_len("vector-matrix destination", a.columns(), y.len());
    backend.gemv(
        Transpose::Trans,
        a.rows(),
        a.columns(),
        alpha,
        a.as_slice(),
        x.as_slice(),
        beta,
        y.as_mut_slice(),
    );
}

/// `y = alpha * S * x + beta * y` reading only the upper triangle of `S`.
///
/// Also serves `xᵀ S`, which equals `(S x)ᵀ` for symmetric `S`.
#[track_caller]
pub fn symmetric_mat_vec<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    alpha: T,
    s: &Matrix<T>,
    x: &Vector<T>,
    beta: T,
    y: &mut Vector<T>,
) {
    assert_square("symmetric operand", s.shape());
    assert_len("symmetric matrix-vector operand", s.rows(), x.len());
    assert_len("symmetric matrix-vector destination", s.rows(), y.len());
    backend.symv(s.rows(), alpha, s.as_slice(), x.as_slice(), beta, y.as_mut_slice());
}

/// `y = alpha * H * x + beta * y` reading only the upper triangle of `H`.
#[track_caller]
pub fn hermitian_mat_vec<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    alpha: T,
    h: &Matrix<T>,
    x: &Vector<T>,
    beta: T,
    y: &mut Vector<T>,
) {
    assert_square("Hermitian operand", h.shape());
    assert_len("Hermitian matrix-vector operand", h.rows(), x.len());
    assert_len("Hermitian matrix-vector destination", h.rows(), y.len());
    backend.hemv(h.rows(), alpha, h.as_slice(), x.as_slice(), beta, y.as_mut_slice());
}

/// `y = alpha * xᵀ H + beta * y` reading only the upper triangle of `H`.
///
/// `xᵀ H = Hᵀ x = conj(H) x`; for real `H` this is the symmetric product.
#[track_caller]
pub fn hermitian_vec_mat<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    alpha: T,
    x: &Vector<T>,
    h: &Matrix<T>,
    beta: T,
    y: &mut Vector<T>,
) {
    assert_square("Hermitian operand", h.shape());
    assert_len("Hermitian vector-matrix operand", h.rows(), x.len());
    assert_len("Hermitian vector-matrix destination", h.columns(), y.len());
    backend.hemv_transposed(h.rows(), alpha, h.as_slice(), x.as_slice(), beta, y.as_mut_slice());
}

// ── Level 3 ─────────────────────────────────────────────────────────

/// `C = alpha * A * B + beta * C`.
#[track_caller]
pub fn mat_mul<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    alpha: T,
    a: &Matrix<T>,
    b: &Matrix<T>,
    beta: T,
    c: &mut Matrix<T>,
) {
    assert!(
        a.columns() == b.rows(),
        "dimension mismatch: {}x{} * {}x{}",
        a.rows(),
        a.columns(),
        b.rows(),
        b.columns()
    );
    assert_shape("product destination", (a.rows(), b.columns()), c.shape());
    backend.gemm(
        a.rows(),
        b.columns(),
        a.columns(),
        alpha,
        a.as_slice(),
        b.as_slice(),
        beta,
        c.as_mut_slice(),
    );
}

#[track_caller]
fn structured_shapes(what: &str, side: Side, s: (usize, usize), other: (usize, usize), c: (usize, usize)) {
    assert_square(what, s);
    match side {
        Side::Left => assert!(
            s.1 == other.0,
            "dimension mismatch: {}x{} * {}x{}",
            s.0,
            s.1,
            other.0,
            other.1
        ),
        Side::Right => assert!(
            other.1 == s.0,
            "dimension mismatch: {}x{} * {}x{}",
            other.0,
            other.1,
            s.0,
            s.1
        ),
    }
    assert_shape("product destination", other, c);
}

/// `C = alpha * S * B + beta * C` ([`Side::Left`]) or
/// `C = alpha * B * S + beta * C` ([`Side::Right`]), reading only the
/// upper triangle of `S`.
#[track_caller]
pub fn symmetric_mat_mul<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    side: Side,
    alpha: T,
    s: &Matrix<T>,
    other: &Matrix<T>,
    beta: T,
    c: &mut Matrix<T>,
) {
    structured_shapes("symmetric operand", side, s.shape(), other.shape(), c.shape());
    backend.symm(
        side,
        c.rows(),
        c.columns(),
        alpha,
        s.as_slice(),
        other.as_slice(),
        beta,
        c.as_mut_slice(),
    );
}

/// Hermitian counterpart of [`symmetric_mat_mul`].
#[track_caller]
pub fn hermitian_mat_mul<T: LinalgScalar>(
    backend: &dyn NumericBackend<T>,
    side: Side,
    alpha: T,
    h: &Matrix<T>,
    other: &Matrix<T>,
    beta: T,
    c: &mut Matrix<T>,
) {
    structured_shapes("Hermitian operand", side, h.shape(), other.shape(), c.shape());
    backend.hemm(
        side,
        c.rows(),
        c.columns(),
        alpha,
        h.as_slice(),
        other.as_slice(),
        beta,
        c.as_mut_slice(),
    );
}

/// `xᵀ M y` (or `xᴴ M y` when `conjugate`), `M` of shape `len(x) x len(y)`.
#[track_caller]
pub(crate) fn bilinear<T: LinalgScalar>(x: &Vector<T>, m: &Matrix<T>, y: &Vector<T>, conjugate: bool) -> T {
    assert_shape("metric", (x.len(), y.len()), m.shape());
    let mut result = T::zero();
    for i in 0..x.len() {
        let xi = if conjugate { x[i].conj() } else { x[i] };
        let row = m.row(i);
        for j in 0..y.len() {
            result = (xi * row[j]).mul_add_relaxed(y[j], result);
        }
    }
    result
}
