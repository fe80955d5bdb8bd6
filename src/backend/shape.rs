//! Buffer-length checks run by every backend before touching memory.
//!
//! The slice lengths must match what the dimension arguments imply; CBLAS
//! trusts the dimensions alone, so a mismatch panics here instead.

use super::{Side, Transpose};

#[inline]
#[track_caller]
fn area(rows: usize, columns: usize) -> usize {
    match rows.checked_mul(columns) {
        Some(n) => n,
        None => panic!("dimension overflow: {}x{}", rows, columns),
    }
}

#[inline]
#[track_caller]
fn expect_len(what: &str, len: usize, expected: usize) {
    assert!(
        len == expected,
        "buffer length mismatch: `{}` has {} elements, expected {}",
        what,
        len,
        expected
    );
}

/// Two vectors of equal length.
#[inline]
#[track_caller]
pub(crate) fn pair(x: usize, y: usize) {
    expect_len("y", y, x);
}

/// `a` is `m x n`; `x` and `y` follow `trans`.
#[inline]
#[track_caller]
pub(crate) fn gemv(trans: Transpose, m: usize, n: usize, a: usize, x: usize, y: usize) {
    expect_len("a", a, area(m, n));
    let (cols, rows) = match trans {
        Transpose::NoTrans => (n, m),
        Transpose::Trans | Transpose::ConjTrans => (m, n),
    };
    expect_len("x", x, cols);
    expect_len("y", y, rows);
}

/// `a` is `n x n`, `x` and `y` have length `n`.
#[inline]
#[track_caller]
pub(crate) fn square_mv(n: usize, a: usize, x: usize, y: usize) {
    expect_len("a", a, area(n, n));
    expect_len("x", x, n);
    expect_len("y", y, n);
}

/// `a: m x k`, `b: k x n`, `c: m x n`.
#[inline]
#[track_caller]
pub(crate) fn gemm(m: usize, n: usize, k: usize, a: usize, b: usize, c: usize) {
    expect_len("a", a, area(m, k));
    expect_len("b", b, area(k, n));
    expect_len("c", c, area(m, n));
}

/// Square `a` of order `m` (left) or `n` (right); `b` and `c` are `m x n`.
#[inline]
#[track_caller]
pub(crate) fn symm(side: Side, m: usize, n: usize, a: usize, b: usize, c: usize) {
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };
    expect_len("a", a, area(order, order));
    expect_len("b", b, area(m, n));
    expect_len("c", c, area(m, n));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_shapes_pass() {
        pair(0, 0);
        gemv(Transpose::NoTrans, 2, 3, 6, 3, 2);
        gemv(Transpose::ConjTrans, 2, 3, 6, 2, 3);
        square_mv(0, 0, 0, 0);
        gemm(2, 3, 4, 8, 12, 6);
        symm(Side::Right, 4, 2, 4, 8, 8);
    }

    #[test]
    #[should_panic(expected = "`x` has 2 elements, expected 3")]
    fn gemv_transposed_operand() {
        gemv(Transpose::Trans, 3, 2, 6, 2, 2);
    }

    #[test]
    #[should_panic(expected = "dimension overflow")]
    fn overflowing_dimensions() {
        gemm(usize::MAX, 2, 1, 0, 2, 0);
    }
}
