//! Generic loop implementations of every backend routine.
//!
//! These work for any [`LinalgScalar`] and define the results the
//! accelerated path is compared against. All buffers are row-major; see
//! [`NumericBackend`] for the shape conventions.

use num_traits::{Float, Zero};

use crate::backend::{shape, NumericBackend, Side, Transpose};
use crate::traits::LinalgScalar;

/// Backend running the generic loops in this module.
///
/// Always available; used for every element type without a CBLAS binding
/// and whenever no library is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceBackend;

// ── Helpers ─────────────────────────────────────────────────────────

/// `alpha * acc + beta * old`, never reading `old` when `beta` is zero.
#[inline]
fn combine<T: LinalgScalar>(alpha: T, acc: T, beta: T, old: T) -> T {
    if beta.is_zero() {
        alpha * acc
    } else {
        alpha.mul_add_relaxed(acc, beta * old)
    }
}

/// `y *= beta`, or fill with zero when `beta` is zero.
#[inline]
fn prescale<T: LinalgScalar>(beta: T, y: &mut [T]) {
    if beta.is_zero() {
        y.fill(T::zero());
    } else if beta != T::one() {
        scal(beta, y);
    }
}

/// Element `(i, j)` of a symmetric matrix stored in the upper triangle.
#[inline]
fn sym_at<T: LinalgScalar>(a: &[T], n: usize, i: usize, j: usize) -> T {
    if j >= i {
        a[i * n + j]
    } else {
        a[j * n + i]
    }
}

/// Element `(i, j)` of a Hermitian matrix stored in the upper triangle.
#[inline]
fn herm_at<T: LinalgScalar>(a: &[T], n: usize, i: usize, j: usize) -> T {
    if j > i {
        a[i * n + j]
    } else if j < i {
        a[j * n + i].conj()
    } else {
        T::from_real(a[i * n + i].re())
    }
}

// ── Level 1 ─────────────────────────────────────────────────────────

/// Dot product without conjugation.
#[inline]
pub fn dot<T: LinalgScalar>(x: &[T], y: &[T]) -> T {
    shape::pair(x.len(), y.len());
    let mut sum = T::zero();
    for i in 0..x.len() {
        sum = x[i].mul_add_relaxed(y[i], sum);
    }
    sum
}

/// Dot product conjugating `x`.
#[inline]
pub fn dotc<T: LinalgScalar>(x: &[T], y: &[T]) -> T {
    shape::pair(x.len(), y.len());
    let mut sum = T::zero();
    for i in 0..x.len() {
        sum = x[i].conj().mul_add_relaxed(y[i], sum);
    }
    sum
}

/// AXPY: `y[i] += alpha * x[i]`.
#[inline]
pub fn axpy<T: LinalgScalar>(alpha: T, x: &[T], y: &mut [T]) {
    shape::pair(x.len(), y.len());
    for i in 0..y.len() {
        y[i] = alpha.mul_add_relaxed(x[i], y[i]);
    }
}

/// In-place scale: `x[i] *= alpha`.
#[inline]
pub fn scal<T: LinalgScalar>(alpha: T, x: &mut [T]) {
    for v in x.iter_mut() {
        *v = *v * alpha;
    }
}

#[inline]
pub fn copy<T: LinalgScalar>(x: &[T], y: &mut [T]) {
    shape::pair(x.len(), y.len());
    y.copy_from_slice(x);
}

#[inline]
pub fn swap<T: LinalgScalar>(x: &mut [T], y: &mut [T]) {
    shape::pair(x.len(), y.len());
    x.swap_with_slice(y);
}

/// Euclidean norm, `sqrt(Σ |x[i]|²)`.
#[inline]
pub fn nrm2<T: LinalgScalar>(x: &[T]) -> T::Real {
    let mut sum = <T::Real as Zero>::zero();
    for v in x {
        let m = v.modulus();
        sum = m.mul_add(m, sum);
    }
    Float::sqrt(sum)
}

/// `Σ (|re| + |im|)`.
#[inline]
pub fn asum<T: LinalgScalar>(x: &[T]) -> T::Real {
    x.iter()
        .fold(<T::Real as Zero>::zero(), |acc, v| acc + v.abs1())
}

/// First index of the largest `|re| + |im|`.
#[inline]
pub fn iamax<T: LinalgScalar>(x: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T::Real)> = None;
    for (i, v) in x.iter().enumerate() {
        let m = v.abs1();
        match best {
            Some((_, b)) if m <= b => {}
            _ => best = Some((i, m)),
        }
    }
    best.map(|(i, _)| i)
}

// ── Level 2 ─────────────────────────────────────────────────────────

/// `y = alpha * op(A) * x + beta * y`, `A` stored `m x n`.
#[allow(clippy::too_many_arguments)]
pub fn gemv<T: LinalgScalar>(
    trans: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    x: &[T],
    beta: T,
    y: &mut [T],
) {
    shape::gemv(trans, m, n, a.len(), x.len(), y.len());
    match trans {
        Transpose::NoTrans => {

            if m == 2 && n == 2 {
                let y0 = a[0].mul_add_relaxed(x[0], a[1] * x[1]);
                let y1 = a[2].mul_add_relaxed(x[0], a[3] * x[1]);
                y[0] = combine(alpha, y0, beta, y[0]);
                y[1] = combine(alpha, y1, beta, y[1]);
                return;
            }

            for i in 0..m {
                let row = &a[i * n..(i + 1) * n];
                let mut acc = T::zero();
                for j in 0..n {
                    acc = row[j].mul_add_relaxed(x[j], acc);
                }
                y[i] = combine(alpha, acc, beta, y[i]);
            }
        }
        Transpose::Trans | Transpose::ConjTrans => {
            let conj = trans == Transpose::ConjTrans;

            prescale(beta, y);
            for i in 0..m {
                let xi = alpha * x[i];
                let row = &a[i * n..(i + 1) * n];
                for j in 0..n {
                    let aij = if conj { row[j].conj() } else { row[j] };
                    y[j] = aij.mul_add_relaxed(xi, y[j]);
                }
            }
        }
    }
}

fn structured_mv<T: LinalgScalar>(
    n: usize,
    alpha: T,
    x: &[T],
    beta: T,
    y: &mut [T],
    at: impl Fn(usize, usize) -> T,
) {
    for i in 0..n {
        let mut acc = T::zero();
        for j in 0..n {
            acc = at(i, j).mul_add_relaxed(x[j], acc);
        }
        y[i] = combine(alpha, acc, beta, y[i]);
    }
}

/// `y = alpha * S * x + beta * y`, reading only the upper triangle of `S`.
pub fn symv<T: LinalgScalar>(n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
    shape::square_mv(n, a.len(), x.len(), y.len());
    structured_mv(n, alpha, x, beta, y, |i, j| sym_at(a, n, i, j));
}

/// `y = alpha * H * x + beta * y`, reading only the upper triangle of `H`.
pub fn hemv<T: LinalgScalar>(n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
    shape::square_mv(n, a.len(), x.len(), y.len());
    structured_mv(n, alpha, x, beta, y, |i, j| herm_at(a, n, i, j));
}

/// `y = alpha * Hᵀ * x + beta * y`, i.e. `xᵀ H`, reading only the upper
/// triangle of `H`.
pub fn hemv_transposed<T: LinalgScalar>(n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
    shape::square_mv(n, a.len(), x.len(), y.len());
    structured_mv(n, alpha, x, beta, y, |i, j| herm_at(a, n, j, i));
}

// ── Level 3 ─────────────────────────────────────────────────────────

/// `C = alpha * A * B + beta * C` in i-k-j order.
#[allow(clippy::too_many_arguments)]
pub fn gemm<T: LinalgScalar>(
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    b: &[T],
    beta: T,
    c: &mut [T],
) {
    shape::gemm(m, n, k, a.len(), b.len(), c.len());

    prescale(beta, c);
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let aip = alpha * a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for j in 0..n {
                c_row[j] = aip.mul_add_relaxed(b_row[j], c_row[j]);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn structured_mm<T: LinalgScalar>(
    side: Side,
    m: usize,
    n: usize,
    alpha: T,
    b: &[T],
    beta: T,
    c: &mut [T],
    at: impl Fn(usize, usize) -> T,
) {
    prescale(beta, c);
    match side {
        // C[i, :] += alpha * Σ_p S[i, p] * B[p, :]
        Side::Left => {
            for i in 0..m {
                for p in 0..m {
                    let sip = alpha * at(i, p);
                    let b_row = &b[p * n..(p + 1) * n];
                    let c_row = &mut c[i * n..(i + 1) * n];
                    for j in 0..n {
                        c_row[j] = sip.mul_add_relaxed(b_row[j], c_row[j]);
                    }
                }
            }
        }
        // C[i, :] += alpha * Σ_p B[i, p] * S[p, :]
        Side::Right => {
            for i in 0..m {
                for p in 0..n {
                    let bip = alpha * b[i * n + p];
                    let c_row = &mut c[i * n..(i + 1) * n];
                    for j in 0..n {
                        c_row[j] = bip.mul_add_relaxed(at(p, j), c_row[j]);
                    }
                }
            }
        }
    }
}

/// Symmetric-times-general product reading only the upper triangle of `S`.
/// `S` has order `m` on the left, `n` on the right.
#[allow(clippy::too_many_arguments)]
pub fn symm<T: LinalgScalar>(
    side: Side,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    b: &[T],
    beta: T,
    c: &mut [T],
) {
    shape::symm(side, m, n, a.len(), b.len(), c.len());
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };
    structured_mm(side, m, n, alpha, b, beta, c, |i, j| sym_at(a, order, i, j));
}

/// Hermitian counterpart of [`symm`].
#[allow(clippy::too_many_arguments)]
pub fn hemm<T: LinalgScalar>(
    side: Side,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    b: &[T],
    beta: T,
    c: &mut [T],
) {
    shape::symm(side, m, n, a.len(), b.len(), c.len());
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };
    structured_mm(side, m, n, alpha, b, beta, c, |i, j| herm_at(a, order, i, j));
}

// ── Backend impl ────────────────────────────────────────────────────

impl<T: LinalgScalar> NumericBackend<T> for ReferenceBackend {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn dot(&self, x: &[T], y: &[T]) -> T {
        dot(x, y)
    }

    fn dotc(&self, x: &[T], y: &[T]) -> T {
        dotc(x, y)
    }

    fn axpy(&self, alpha: T, x: &[T], y: &mut [T]) {
        axpy(alpha, x, y)
    }

    fn scal(&self, alpha: T, x: &mut [T]) {
        scal(alpha, x)
    }

    fn copy(&self, x: &[T], y: &mut [T]) {
        copy(x, y)
    }

    fn swap(&self, x: &mut [T], y: &mut [T]) {
        swap(x, y)
    }

    fn nrm2(&self, x: &[T]) -> T::Real {
        nrm2(x)
    }

    fn asum(&self, x: &[T]) -> T::Real {
        asum(x)
    }

    fn iamax(&self, x: &[T]) -> Option<usize> {
        iamax(x)
    }

    fn gemv(
        &self,
        trans: Transpose,
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        x: &[T],
        beta: T,
        y: &mut [T],
    ) {
        gemv(trans, m, n, alpha, a, x, beta, y)
    }

    fn symv(&self, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
        symv(n, alpha, a, x, beta, y)
    }

    fn hemv(&self, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
        hemv(n, alpha, a, x, beta, y)
    }

    fn hemv_transposed(&self, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]) {
        hemv_transposed(n, alpha, a, x, beta, y)
    }

    fn gemm(
        &self,
        m: usize,
        n: usize,
        k: usize,
        alpha: T,
        a: &[T],
        b: &[T],
        beta: T,
        c: &mut [T],
    ) {
        gemm(m, n, k, alpha, a, b, beta, c)
    }

    fn symm(
        &self,
        side: Side,
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        b: &[T],
        beta: T,
        c: &mut [T],
    ) {
        symm(side, m, n, alpha, a, b, beta, c)
    }

    fn hemm(
        &self,
        side: Side,
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        b: &[T],
        beta: T,
        c: &mut [T],
    ) {
        hemm(side, m, n, alpha, a, b, beta, c)
    }
}
