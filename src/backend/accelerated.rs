use std::os::raw::c_void;

use libloading::Library;
use num_complex::Complex;
use num_traits::Zero;

use super::cblas::{BlasInt, CblasApi};
use super::{shape, BackendConfig, BackendError, BackendMode, Layout, NumericBackend, Side, Transpose, Uplo};
use crate::kernels::reference;

/// CBLAS routines resolved from a shared library at runtime.
///
/// Serves `f32`, `f64`, `Complex<f32>` and `Complex<f64>`. A routine the
/// library does not export, a call smaller than
/// [`min_elements`](AcceleratedBackend::min_elements), an empty dimension or
/// one that does not fit a 32-bit BLAS integer all run on the reference
/// kernel instead.
pub struct AcceleratedBackend {
    api: CblasApi,
    library: String,
    min_elements: usize,
    // Keeps the function pointers in `api` valid; `None` only with an empty table.
    _lib: Option<Library>,
}

impl core::fmt::Debug for AcceleratedBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AcceleratedBackend")
            .field("library", &self.library)
            .field("routines", &self.api.count())
            .field("min_elements", &self.min_elements)
            .finish()
    }
}

impl AcceleratedBackend {
    /// Open the first candidate library from `config` that exports CBLAS.
    ///
    /// Independent of the process-wide backend: the result is owned by the
    /// caller, which makes side-by-side comparisons against the reference
    /// kernels possible.
    pub fn load(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.mode == BackendMode::Reference {
            return Err(BackendError::Disabled);
        }

        let mut tried = Vec::with_capacity(config.libraries.len());
        let mut without_symbols = None;

        for name in &config.libraries {
            tracing::debug!(library = %name, "trying CBLAS library");

            // Safety: loading a shared library runs its initializers; the
            // candidates are BLAS implementations chosen by configuration.
            let lib = match unsafe { Library::new(name) } {
                Ok(lib) => lib,
                Err(err) => {
                    tracing::debug!(library = %name, error = %err, "could not open library");
                    tried.push(name.clone());
                    continue;
                }
            };

            // Safety: symbols are looked up under their standard CBLAS names
            // with the matching C signatures.
            let api = unsafe { CblasApi::resolve(&lib) };
            if api.count() == 0 {
                tracing::debug!(library = %name, "library exports no CBLAS routines");
                tried.push(name.clone());
                without_symbols.get_or_insert_with(|| name.clone());
                continue;
            }

            return Ok(Self {
                api,
                library: name.clone(),
                min_elements: config.min_elements,
                _lib: Some(lib),
            });
        }

        match without_symbols {
            Some(library) => Err(BackendError::NoSymbols { library }),
            None => Err(BackendError::LibraryNotFound { tried }),
        }
    }

    /// Name or path of the loaded library.
    pub fn library(&self) -> &str {
        &self.library
    }

    /// Number of CBLAS routines resolved.
    pub fn routine_count(&self) -> usize {
        self.api.count()
    }

    /// Calls touching fewer elements (operands plus destination) run on
    /// the reference kernels.
    pub fn min_elements(&self) -> usize {
        self.min_elements
    }

    /// A backend with no routines resolved: every call takes the fallback.
    #[cfg(test)]
    pub(crate) fn unloaded() -> Self {
        Self {
            api: CblasApi::default(),
            library: String::from("<none>"),
            min_elements: 0,
            _lib: None,
        }
    }

    /// BLAS integers for `dims`, or `None` when the call should stay on the
    /// reference path.
    #[inline]
    fn dims<const N: usize>(&self, work: usize, dims: [usize; N]) -> Option<[BlasInt; N]> {
        if work < self.min_elements {
            return None;
        }
        let mut out = [0; N];
        for (slot, d) in out.iter_mut().zip(dims) {
            if d == 0 {
                return None;
            }
            *slot = BlasInt::try_from(d).ok()?;
        }
        Some(out)
    }
}

#[inline]
fn pair_work(len: usize) -> usize {
    len.saturating_mul(2)
}

#[inline]
fn gemv_work(m: usize, n: usize) -> usize {
    m.saturating_mul(n).saturating_add(m).saturating_add(n)
}

#[inline]
fn gemm_work(m: usize, n: usize, k: usize) -> usize {
    m.saturating_mul(k)
        .saturating_add(k.saturating_mul(n))
        .saturating_add(m.saturating_mul(n))
}

#[inline]
fn symm_work(side: Side, m: usize, n: usize) -> usize {
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };
    order
        .saturating_mul(order)
        .saturating_add(m.saturating_mul(n).saturating_mul(2))
}

#[inline]
fn first_index(i: BlasInt) -> Option<usize> {
    usize::try_from(i).ok()
}

// ── Real ────────────────────────────────────────────────────────────

macro_rules! impl_real_backend {
    ($t:ty; $dot:ident, $axpy:ident, $scal:ident, $copy:ident, $swap:ident, $nrm2:ident,
     $asum:ident, $iamax:ident, $gemv:ident, $symv:ident, $gemm:ident, $symm:ident) => {
        impl NumericBackend<$t> for AcceleratedBackend {
            fn name(&self) -> &'static str {
                "cblas"
            }

            fn dot(&self, x: &[$t], y: &[$t]) -> $t {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$dot, self.dims(pair_work(x.len()), [x.len()])) {
                    return unsafe { f(n, x.as_ptr(), 1, y.as_ptr(), 1) };
                }
                reference::dot(x, y)
            }

            fn dotc(&self, x: &[$t], y: &[$t]) -> $t {
                self.dot(x, y)
            }

            fn axpy(&self, alpha: $t, x: &[$t], y: &mut [$t]) {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$axpy, self.dims(pair_work(x.len()), [x.len()])) {
                    unsafe { f(n, alpha, x.as_ptr(), 1, y.as_mut_ptr(), 1) };
                    return;
                }
                reference::axpy(alpha, x, y)
            }

            fn scal(&self, alpha: $t, x: &mut [$t]) {
                if let (Some(f), Some([n])) = (self.api.$scal, self.dims(x.len(), [x.len()])) {
                    unsafe { f(n, alpha, x.as_mut_ptr(), 1) };
                    return;
                }
                reference::scal(alpha, x)
            }

            fn copy(&self, x: &[$t], y: &mut [$t]) {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$copy, self.dims(pair_work(x.len()), [x.len()])) {
                    unsafe { f(n, x.as_ptr(), 1, y.as_mut_ptr(), 1) };
                    return;
                }
                reference::copy(x, y)
            }

            fn swap(&self, x: &mut [$t], y: &mut [$t]) {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$swap, self.dims(pair_work(x.len()), [x.len()])) {
                    unsafe { f(n, x.as_mut_ptr(), 1, y.as_mut_ptr(), 1) };
                    return;
                }
                reference::swap(x, y)
            }

            fn nrm2(&self, x: &[$t]) -> $t {
                if let (Some(f), Some([n])) = (self.api.$nrm2, self.dims(x.len(), [x.len()])) {
                    return unsafe { f(n, x.as_ptr(), 1) };
                }
                reference::nrm2(x)
            }

            fn asum(&self, x: &[$t]) -> $t {
                if let (Some(f), Some([n])) = (self.api.$asum, self.dims(x.len(), [x.len()])) {
                    return unsafe { f(n, x.as_ptr(), 1) };
                }
                reference::asum(x)
            }

            fn iamax(&self, x: &[$t]) -> Option<usize> {
                if let (Some(f), Some([n])) = (self.api.$iamax, self.dims(x.len(), [x.len()])) {
                    return first_index(unsafe { f(n, x.as_ptr(), 1) });
                }
                reference::iamax(x)
            }

            fn gemv(
                &self,
                trans: Transpose,
                m: usize,
                n: usize,
                alpha: $t,
                a: &[$t],
                x: &[$t],
                beta: $t,
                y: &mut [$t],
            ) {
                shape::gemv(trans, m, n, a.len(), x.len(), y.len());
                if let (Some(f), Some([bm, bn])) = (self.api.$gemv, self.dims(gemv_work(m, n), [m, n])) {
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            trans.raw(),
                            bm,
                            bn,
                            alpha,
                            a.as_ptr(),
                            bn,
                            x.as_ptr(),
                            1,
                            beta,
                            y.as_mut_ptr(),
                            1,
                        )
                    };
                    return;
                }
                reference::gemv(trans, m, n, alpha, a, x, beta, y)
            }

            fn symv(&self, n: usize, alpha: $t, a: &[$t], x: &[$t], beta: $t, y: &mut [$t]) {
                shape::square_mv(n, a.len(), x.len(), y.len());
                if let (Some(f), Some([bn])) = (self.api.$symv, self.dims(gemv_work(n, n), [n])) {
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            Uplo::Upper.raw(),
                            bn,
                            alpha,
                            a.as_ptr(),
                            bn,
                            x.as_ptr(),
                            1,
                            beta,
                            y.as_mut_ptr(),
                            1,
                        )
                    };
                    return;
                }
                reference::symv(n, alpha, a, x, beta, y)
            }

            fn hemv(&self, n: usize, alpha: $t, a: &[$t], x: &[$t], beta: $t, y: &mut [$t]) {
                self.symv(n, alpha, a, x, beta, y)
            }

            fn hemv_transposed(&self, n: usize, alpha: $t, a: &[$t], x: &[$t], beta: $t, y: &mut [$t]) {
                self.symv(n, alpha, a, x, beta, y)
            }

            fn gemm(
                &self,
                m: usize,
                n: usize,
                k: usize,
                alpha: $t,
                a: &[$t],
                b: &[$t],
                beta: $t,
                c: &mut [$t],
            ) {
                shape::gemm(m, n, k, a.len(), b.len(), c.len());
                if let (Some(f), Some([bm, bn, bk])) =
                    (self.api.$gemm, self.dims(gemm_work(m, n, k), [m, n, k]))
                {
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            Transpose::NoTrans.raw(),
                            Transpose::NoTrans.raw(),
                            bm,
                            bn,
                            bk,
                            alpha,
                            a.as_ptr(),
                            bk,
                            b.as_ptr(),
                            bn,
                            beta,
                            c.as_mut_ptr(),
                            bn,
                        )
                    };
                    return;
                }
                reference::gemm(m, n, k, alpha, a, b, beta, c)
            }

            fn symm(
                &self,
                side: Side,
                m: usize,
                n: usize,
                alpha: $t,
                a: &[$t],
                b: &[$t],
                beta: $t,
                c: &mut [$t],
            ) {
                shape::symm(side, m, n, a.len(), b.len(), c.len());
                if let (Some(f), Some([bm, bn])) =
                    (self.api.$symm, self.dims(symm_work(side, m, n), [m, n]))
                {
                    let lda = match side {
                        Side::Left => bm,
                        Side::Right => bn,
                    };
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            side.raw(),
                            Uplo::Upper.raw(),
                            bm,
                            bn,
                            alpha,
                            a.as_ptr(),
                            lda,
                            b.as_ptr(),
                            bn,
                            beta,
                            c.as_mut_ptr(),
                            bn,
                        )
                    };
                    return;
                }
                reference::symm(side, m, n, alpha, a, b, beta, c)
            }

            fn hemm(
                &self,
                side: Side,
                m: usize,
                n: usize,
                alpha: $t,
                a: &[$t],
                b: &[$t],
                beta: $t,
                c: &mut [$t],
            ) {
                self.symm(side, m, n, alpha, a, b, beta, c)
            }
        }
    };
}

impl_real_backend!(f32; sdot, saxpy, sscal, scopy, sswap, snrm2, sasum, isamax, sgemv, ssymv, sgemm, ssymm);
impl_real_backend!(f64; ddot, daxpy, dscal, dcopy, dswap, dnrm2, dasum, idamax, dgemv, dsymv, dgemm, dsymm);

// ── Complex ─────────────────────────────────────────────────────────

#[inline]
fn scalar_ptr<T>(s: &T) -> *const c_void {
    (s as *const T).cast()
}

macro_rules! impl_complex_backend {
    ($r:ty; $dotu:ident, $dotc:ident, $axpy:ident, $scal:ident, $copy:ident, $swap:ident,
     $nrm2:ident, $asum:ident, $iamax:ident, $gemv:ident, $hemv:ident, $gemm:ident,
     $symm:ident, $hemm:ident) => {
        impl NumericBackend<Complex<$r>> for AcceleratedBackend {
            fn name(&self) -> &'static str {
                "cblas"
            }

            fn dot(&self, x: &[Complex<$r>], y: &[Complex<$r>]) -> Complex<$r> {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$dotu, self.dims(pair_work(x.len()), [x.len()])) {
                    let mut out = Complex::<$r>::zero();
                    unsafe {
                        f(n, x.as_ptr().cast(), 1, y.as_ptr().cast(), 1, (&mut out as *mut Complex<$r>).cast())
                    };
                    return out;
                }
                reference::dot(x, y)
            }

            fn dotc(&self, x: &[Complex<$r>], y: &[Complex<$r>]) -> Complex<$r> {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$dotc, self.dims(pair_work(x.len()), [x.len()])) {
                    let mut out = Complex::<$r>::zero();
                    unsafe {
                        f(n, x.as_ptr().cast(), 1, y.as_ptr().cast(), 1, (&mut out as *mut Complex<$r>).cast())
                    };
                    return out;
                }
                reference::dotc(x, y)
            }

            fn axpy(&self, alpha: Complex<$r>, x: &[Complex<$r>], y: &mut [Complex<$r>]) {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$axpy, self.dims(pair_work(x.len()), [x.len()])) {
                    unsafe { f(n, scalar_ptr(&alpha), x.as_ptr().cast(), 1, y.as_mut_ptr().cast(), 1) };
                    return;
                }
                reference::axpy(alpha, x, y)
            }

            fn scal(&self, alpha: Complex<$r>, x: &mut [Complex<$r>]) {
                if let (Some(f), Some([n])) = (self.api.$scal, self.dims(x.len(), [x.len()])) {
                    unsafe { f(n, scalar_ptr(&alpha), x.as_mut_ptr().cast(), 1) };
                    return;
                }
                reference::scal(alpha, x)
            }

            fn copy(&self, x: &[Complex<$r>], y: &mut [Complex<$r>]) {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$copy, self.dims(pair_work(x.len()), [x.len()])) {
                    unsafe { f(n, x.as_ptr().cast(), 1, y.as_mut_ptr().cast(), 1) };
                    return;
                }
                reference::copy(x, y)
            }

            fn swap(&self, x: &mut [Complex<$r>], y: &mut [Complex<$r>]) {
                shape::pair(x.len(), y.len());
                if let (Some(f), Some([n])) = (self.api.$swap, self.dims(pair_work(x.len()), [x.len()])) {
                    unsafe { f(n, x.as_mut_ptr().cast(), 1, y.as_mut_ptr().cast(), 1) };
                    return;
                }
                reference::swap(x, y)
            }

            fn nrm2(&self, x: &[Complex<$r>]) -> $r {
                if let (Some(f), Some([n])) = (self.api.$nrm2, self.dims(x.len(), [x.len()])) {
                    return unsafe { f(n, x.as_ptr().cast(), 1) };
                }
                reference::nrm2(x)
            }

            fn asum(&self, x: &[Complex<$r>]) -> $r {
                if let (Some(f), Some([n])) = (self.api.$asum, self.dims(x.len(), [x.len()])) {
                    return unsafe { f(n, x.as_ptr().cast(), 1) };
                }
                reference::asum(x)
            }

            fn iamax(&self, x: &[Complex<$r>]) -> Option<usize> {
                if let (Some(f), Some([n])) = (self.api.$iamax, self.dims(x.len(), [x.len()])) {
                    return first_index(unsafe { f(n, x.as_ptr().cast(), 1) });
                }
                reference::iamax(x)
            }

            fn gemv(
                &self,
                trans: Transpose,
                m: usize,
                n: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                x: &[Complex<$r>],
                beta: Complex<$r>,
                y: &mut [Complex<$r>],
            ) {
                shape::gemv(trans, m, n, a.len(), x.len(), y.len());
                if let (Some(f), Some([bm, bn])) = (self.api.$gemv, self.dims(gemv_work(m, n), [m, n])) {
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            trans.raw(),
                            bm,
                            bn,
                            scalar_ptr(&alpha),
                            a.as_ptr().cast(),
                            bn,
                            x.as_ptr().cast(),
                            1,
                            scalar_ptr(&beta),
                            y.as_mut_ptr().cast(),
                            1,
                        )
                    };
                    return;
                }
                reference::gemv(trans, m, n, alpha, a, x, beta, y)
            }

            // CBLAS has no complex symv.
            fn symv(
                &self,
                n: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                x: &[Complex<$r>],
                beta: Complex<$r>,
                y: &mut [Complex<$r>],
            ) {
                reference::symv(n, alpha, a, x, beta, y)
            }

            fn hemv(
                &self,
                n: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                x: &[Complex<$r>],
                beta: Complex<$r>,
                y: &mut [Complex<$r>],
            ) {
                shape::square_mv(n, a.len(), x.len(), y.len());
                if let (Some(f), Some([bn])) = (self.api.$hemv, self.dims(gemv_work(n, n), [n])) {
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            Uplo::Upper.raw(),
                            bn,
                            scalar_ptr(&alpha),
                            a.as_ptr().cast(),
                            bn,
                            x.as_ptr().cast(),
                            1,
                            scalar_ptr(&beta),
                            y.as_mut_ptr().cast(),
                            1,
                        )
                    };
                    return;
                }
                reference::hemv(n, alpha, a, x, beta, y)
            }

            // Row-major upper `H` is column-major lower `Hᵀ`.
            fn hemv_transposed(
                &self,
                n: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                x: &[Complex<$r>],
                beta: Complex<$r>,
                y: &mut [Complex<$r>],
            ) {
                shape::square_mv(n, a.len(), x.len(), y.len());
                if let (Some(f), Some([bn])) = (self.api.$hemv, self.dims(gemv_work(n, n), [n])) {
                    unsafe {
                        f(
                            Layout::ColMajor.raw(),
                            Uplo::Lower.raw(),
                            bn,
                            scalar_ptr(&alpha),
                            a.as_ptr().cast(),
                            bn,
                            x.as_ptr().cast(),
                            1,
                            scalar_ptr(&beta),
                            y.as_mut_ptr().cast(),
                            1,
                        )
                    };
                    return;
                }
                reference::hemv_transposed(n, alpha, a, x, beta, y)
            }

            fn gemm(
                &self,
                m: usize,
                n: usize,
                k: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                b: &[Complex<$r>],
                beta: Complex<$r>,
                c: &mut [Complex<$r>],
            ) {
                shape::gemm(m, n, k, a.len(), b.len(), c.len());
                if let (Some(f), Some([bm, bn, bk])) =
                    (self.api.$gemm, self.dims(gemm_work(m, n, k), [m, n, k]))
                {
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            Transpose::NoTrans.raw(),
                            Transpose::NoTrans.raw(),
                            bm,
                            bn,
                            bk,
                            scalar_ptr(&alpha),
                            a.as_ptr().cast(),
                            bk,
                            b.as_ptr().cast(),
                            bn,
                            scalar_ptr(&beta),
                            c.as_mut_ptr().cast(),
                            bn,
                        )
                    };
                    return;
                }
                reference::gemm(m, n, k, alpha, a, b, beta, c)
            }

            fn symm(
                &self,
                side: Side,
                m: usize,
                n: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                b: &[Complex<$r>],
                beta: Complex<$r>,
                c: &mut [Complex<$r>],
            ) {
                shape::symm(side, m, n, a.len(), b.len(), c.len());
                if let (Some(f), Some([bm, bn])) =
                    (self.api.$symm, self.dims(symm_work(side, m, n), [m, n]))
                {
                    let lda = match side {
                        Side::Left => bm,
                        Side::Right => bn,
                    };
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            side.raw(),
                            Uplo::Upper.raw(),
                            bm,
                            bn,
                            scalar_ptr(&alpha),
                            a.as_ptr().cast(),
                            lda,
                            b.as_ptr().cast(),
                            bn,
                            scalar_ptr(&beta),
                            c.as_mut_ptr().cast(),
                            bn,
                        )
                    };
                    return;
                }
                reference::symm(side, m, n, alpha, a, b, beta, c)
            }

            fn hemm(
                &self,
                side: Side,
                m: usize,
                n: usize,
                alpha: Complex<$r>,
                a: &[Complex<$r>],
                b: &[Complex<$r>],
                beta: Complex<$r>,
                c: &mut [Complex<$r>],
            ) {
                shape::symm(side, m, n, a.len(), b.len(), c.len());
                if let (Some(f), Some([bm, bn])) =
                    (self.api.$hemm, self.dims(symm_work(side, m, n), [m, n]))
                {
                    let lda = match side {
                        Side::Left => bm,
                        Side::Right => bn,
                    };
                    unsafe {
                        f(
                            Layout::RowMajor.raw(),
                            side.raw(),
                            Uplo::Upper.raw(),
                            bm,
                            bn,
                            scalar_ptr(&alpha),
                            a.as_ptr().cast(),
                            lda,
                            b.as_ptr().cast(),
                            bn,
                            scalar_ptr(&beta),
                            c.as_mut_ptr().cast(),
                            bn,
                        )
                    };
                    return;
                }
                reference::hemm(side, m, n, alpha, a, b, beta, c)
            }
        }
    };
}

impl_complex_backend!(f32; cdotu_sub, cdotc_sub, caxpy, cscal, ccopy, cswap, scnrm2, scasum, icamax,
    cgemv, chemv, cgemm, csymm, chemm);
impl_complex_backend!(f64; zdotu_sub, zdotc_sub, zaxpy, zscal, zcopy, zswap, dznrm2, dzasum, izamax,
    zgemv, zhemv, zgemm, zsymm, zhemm);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_estimates() {
        assert_eq!(gemm_work(2, 3, 4), 8 + 12 + 6);
        assert_eq!(symm_work(Side::Left, 3, 2), 9 + 12);
        assert_eq!(symm_work(Side::Right, 3, 2), 4 + 12);
        assert_eq!(gemm_work(usize::MAX, 2, 2), usize::MAX);
        assert_eq!(pair_work(5), 10);
        assert_eq!(gemv_work(2, 3), 6 + 2 + 3);
    }

    #[test]
    fn negative_index_is_none() {
        assert_eq!(first_index(-1), None);
        assert_eq!(first_index(4), Some(4));
    }

    fn unloaded() -> AcceleratedBackend {
        AcceleratedBackend::unloaded()
    }

    #[test]
    fn unloaded_backend_still_computes() {
        let acc = unloaded();
        assert_eq!(NumericBackend::<f64>::dot(&acc, &[1.0, 2.0], &[3.0, 4.0]), 11.0);
        let mut c = [0.0; 4];
        NumericBackend::<f64>::gemm(&acc, 2, 2, 1, 1.0, &[1.0, 2.0], &[3.0, 4.0], 0.0, &mut c);
        assert_eq!(c, [3.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    #[should_panic(expected = "`y` has 1 elements, expected 1000")]
    fn dot_rejects_short_operand() {
        NumericBackend::<f64>::dot(&unloaded(), &[1.0; 1000], &[1.0]);
    }

    #[test]
    #[should_panic(expected = "`y` has 2 elements, expected 3")]
    fn dotc_rejects_short_operand() {
        let x = [Complex::new(1.0_f64, 0.0); 3];
        NumericBackend::<Complex<f64>>::dotc(&unloaded(), &x, &x[..2]);
    }

    #[test]
    #[should_panic(expected = "buffer length mismatch")]
    fn axpy_rejects_short_destination() {
        NumericBackend::<f32>::axpy(&unloaded(), 1.0, &[1.0; 4], &mut [0.0; 3]);
    }

    #[test]
    #[should_panic(expected = "buffer length mismatch")]
    fn copy_rejects_short_destination() {
        NumericBackend::<f64>::copy(&unloaded(), &[1.0; 4], &mut [0.0; 2]);
    }

    #[test]
    #[should_panic(expected = "buffer length mismatch")]
    fn swap_rejects_unequal_lengths() {
        NumericBackend::<Complex<f32>>::swap(&unloaded(), &mut [Complex::new(0.0, 0.0); 2], &mut [Complex::new(0.0, 0.0); 5]);
    }

    #[test]
    #[should_panic(expected = "`a` has 5 elements, expected 6")]
    fn gemv_rejects_short_matrix() {
        let mut y = [0.0; 2];
        NumericBackend::<f64>::gemv(&unloaded(), Transpose::NoTrans, 2, 3, 1.0, &[0.0; 5], &[0.0; 3], 0.0, &mut y);
    }

    #[test]
    #[should_panic(expected = "`y` has 2 elements, expected 3")]
    fn gemv_transposed_rejects_short_destination() {
        let mut y = [0.0; 2];
        NumericBackend::<f64>::gemv(&unloaded(), Transpose::Trans, 2, 3, 1.0, &[0.0; 6], &[0.0; 2], 0.0, &mut y);
    }

    #[test]
    #[should_panic(expected = "`x` has 2 elements, expected 3")]
    fn symv_rejects_short_operand() {
        let mut y = [0.0; 3];
        NumericBackend::<f64>::symv(&unloaded(), 3, 1.0, &[0.0; 9], &[0.0; 2], 0.0, &mut y);
    }

    #[test]
    #[should_panic(expected = "`a` has 3 elements, expected 4")]
    fn hemv_rejects_short_matrix() {
        let z = Complex::new(0.0_f64, 0.0);
        let mut y = [z; 2];
        NumericBackend::<Complex<f64>>::hemv(&unloaded(), 2, z, &[z; 3], &[z; 2], z, &mut y);
    }

    #[test]
    #[should_panic(expected = "`b` has 5 elements, expected 6")]
    fn gemm_rejects_short_operand() {
        let mut c = [0.0; 4];
        NumericBackend::<f64>::gemm(&unloaded(), 2, 2, 3, 1.0, &[0.0; 6], &[0.0; 5], 0.0, &mut c);
    }

    #[test]
    #[should_panic(expected = "`c` has 3 elements, expected 4")]
    fn gemm_rejects_short_destination() {
        let mut c = [0.0; 3];
        NumericBackend::<f32>::gemm(&unloaded(), 2, 2, 3, 1.0, &[0.0; 6], &[0.0; 6], 0.0, &mut c);
    }

    #[test]
    #[should_panic(expected = "`a` has 4 elements, expected 9")]
    fn symm_right_rejects_wrong_order() {
        let mut c = [0.0; 6];
        NumericBackend::<f64>::symm(&unloaded(), Side::Right, 2, 3, 1.0, &[0.0; 4], &[0.0; 6], 0.0, &mut c);
    }

    #[test]
    #[should_panic(expected = "`c` has 4 elements, expected 6")]
    fn hemm_rejects_short_destination() {
        let z = Complex::new(0.0_f32, 0.0);
        let mut c = [z; 4];
        NumericBackend::<Complex<f32>>::hemm(&unloaded(), Side::Left, 2, 3, z, &[z; 4], &[z; 6], z, &mut c);
    }

    #[test]
    fn disabled_config_does_not_load() {
        let cfg = BackendConfig {
            mode: BackendMode::Reference,
            ..BackendConfig::default()
        };
        assert!(matches!(AcceleratedBackend::load(&cfg), Err(BackendError::Disabled)));
    }
}
