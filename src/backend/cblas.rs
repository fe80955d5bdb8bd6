//! Raw CBLAS entry points resolved from a shared library.
//!
//! Only the row-major calling convention is used. Complex scalars and
//! buffers are passed as `*const c_void` / `*mut c_void`; `num_complex::Complex`
//! is `#[repr(C)]` and matches the `{re, im}` layout CBLAS expects.

use std::os::raw::{c_int, c_void};

use libloading::Library;

pub(crate) type BlasInt = c_int;

// ── Level 1 ─────────────────────────────────────────────────────────

pub(crate) type FnDot<R> =
    unsafe extern "C" fn(n: BlasInt, x: *const R, incx: BlasInt, y: *const R, incy: BlasInt) -> R;
pub(crate) type FnDotSub = unsafe extern "C" fn(
    n: BlasInt,
    x: *const c_void,
    incx: BlasInt,
    y: *const c_void,
    incy: BlasInt,
    dot: *mut c_void,
);
pub(crate) type FnAxpy<R> =
    unsafe extern "C" fn(n: BlasInt, alpha: R, x: *const R, incx: BlasInt, y: *mut R, incy: BlasInt);
pub(crate) type FnAxpyComplex = unsafe extern "C" fn(
    n: BlasInt,
    alpha: *const c_void,
    x: *const c_void,
    incx: BlasInt,
    y: *mut c_void,
    incy: BlasInt,
);
pub(crate) type FnScal<R> = unsafe extern "C" fn(n: BlasInt, alpha: R, x: *mut R, incx: BlasInt);
pub(crate) type FnScalComplex =
    unsafe extern "C" fn(n: BlasInt, alpha: *const c_void, x: *mut c_void, incx: BlasInt);
pub(crate) type FnCopy<P> =
    unsafe extern "C" fn(n: BlasInt, x: *const P, incx: BlasInt, y: *mut P, incy: BlasInt);
pub(crate) type FnSwap<P> =
    unsafe extern "C" fn(n: BlasInt, x: *mut P, incx: BlasInt, y: *mut P, incy: BlasInt);
pub(crate) type FnNorm<P, R> = unsafe extern "C" fn(n: BlasInt, x: *const P, incx: BlasInt) -> R;
// CBLAS_INDEX is `size_t` in OpenBLAS and `int` elsewhere; the low 32 bits agree.
pub(crate) type FnIamax<P> = unsafe extern "C" fn(n: BlasInt, x: *const P, incx: BlasInt) -> c_int;

// ── Level 2 ─────────────────────────────────────────────────────────

pub(crate) type FnGemv<S, P> = unsafe extern "C" fn(
    layout: c_int,
    trans: c_int,
    m: BlasInt,
    n: BlasInt,
    alpha: S,
    a: *const P,
    lda: BlasInt,
    x: *const P,
    incx: BlasInt,
    beta: S,
    y: *mut P,
    incy: BlasInt,
);
pub(crate) type FnSymv<S, P> = unsafe extern "C" fn(
    layout: c_int,
    uplo: c_int,
    n: BlasInt,
    alpha: S,
    a: *const P,
    lda: BlasInt,
    x: *const P,
    incx: BlasInt,
    beta: S,
    y: *mut P,
    incy: BlasInt,
);

// ── Level 3 ─────────────────────────────────────────────────────────

pub(crate) type FnGemm<S, P> = unsafe extern "C" fn(
    layout: c_int,
    trans_a: c_int,
    trans_b: c_int,
    m: BlasInt,
    n: BlasInt,
    k: BlasInt,
    alpha: S,
    a: *const P,
    lda: BlasInt,
    b: *const P,
    ldb: BlasInt,
    beta: S,
    c: *mut P,
    ldc: BlasInt,
);
pub(crate) type FnSymm<S, P> = unsafe extern "C" fn(
    layout: c_int,
    side: c_int,
    uplo: c_int,
    m: BlasInt,
    n: BlasInt,
    alpha: S,
    a: *const P,
    lda: BlasInt,
    b: *const P,
    ldb: BlasInt,
    beta: S,
    c: *mut P,
    ldc: BlasInt,
);

type Cv = c_void;
type Cp = *const c_void;

/// Function pointers for every routine the accelerated backend dispatches to.
///
/// Each entry is optional: a library missing one routine still serves the
/// others, and the missing one runs on the reference kernel.
#[derive(Default)]
pub(crate) struct CblasApi {
    pub sdot: Option<FnDot<f32>>,
    pub ddot: Option<FnDot<f64>>,
    pub cdotu_sub: Option<FnDotSub>,
    pub zdotu_sub: Option<FnDotSub>,
    pub cdotc_sub: Option<FnDotSub>,
    pub zdotc_sub: Option<FnDotSub>,

    pub saxpy: Option<FnAxpy<f32>>,
    pub daxpy: Option<FnAxpy<f64>>,
    pub caxpy: Option<FnAxpyComplex>,
    pub zaxpy: Option<FnAxpyComplex>,

    pub sscal: Option<FnScal<f32>>,
    pub dscal: Option<FnScal<f64>>,
    pub cscal: Option<FnScalComplex>,
    pub zscal: Option<FnScalComplex>,

    pub scopy: Option<FnCopy<f32>>,
    pub dcopy: Option<FnCopy<f64>>,
    pub ccopy: Option<FnCopy<Cv>>,
    pub zcopy: Option<FnCopy<Cv>>,

    pub sswap: Option<FnSwap<f32>>,
    pub dswap: Option<FnSwap<f64>>,
    pub cswap: Option<FnSwap<Cv>>,
    pub zswap: Option<FnSwap<Cv>>,

    pub snrm2: Option<FnNorm<f32, f32>>,
    pub dnrm2: Option<FnNorm<f64, f64>>,
    pub scnrm2: Option<FnNorm<Cv, f32>>,
    pub dznrm2: Option<FnNorm<Cv, f64>>,

    pub sasum: Option<FnNorm<f32, f32>>,
    pub dasum: Option<FnNorm<f64, f64>>,
    pub scasum: Option<FnNorm<Cv, f32>>,
    pub dzasum: Option<FnNorm<Cv, f64>>,

    pub isamax: Option<FnIamax<f32>>,
    pub idamax: Option<FnIamax<f64>>,
    pub icamax: Option<FnIamax<Cv>>,
    pub izamax: Option<FnIamax<Cv>>,

    pub sgemv: Option<FnGemv<f32, f32>>,
    pub dgemv: Option<FnGemv<f64, f64>>,
    pub cgemv: Option<FnGemv<Cp, Cv>>,
    pub zgemv: Option<FnGemv<Cp, Cv>>,

    pub ssymv: Option<FnSymv<f32, f32>>,
    pub dsymv: Option<FnSymv<f64, f64>>,
    pub chemv: Option<FnSymv<Cp, Cv>>,
    pub zhemv: Option<FnSymv<Cp, Cv>>,

    pub sgemm: Option<FnGemm<f32, f32>>,
    pub dgemm: Option<FnGemm<f64, f64>>,
    pub cgemm: Option<FnGemm<Cp, Cv>>,
    pub zgemm: Option<FnGemm<Cp, Cv>>,

    pub ssymm: Option<FnSymm<f32, f32>>,
    pub dsymm: Option<FnSymm<f64, f64>>,
    pub csymm: Option<FnSymm<Cp, Cv>>,
    pub zsymm: Option<FnSymm<Cp, Cv>>,
    pub chemm: Option<FnSymm<Cp, Cv>>,
    pub zhemm: Option<FnSymm<Cp, Cv>>,
}

macro_rules! resolve_symbols {
    ($lib:expr; $($field:ident),* $(,)?) => {{
        let mut api = CblasApi::default();
        $( api.$field = symbol($lib, concat!("cblas_", stringify!($field))); )*
        api
    }};
}

macro_rules! count_symbols {
    ($api:expr; $($field:ident),* $(,)?) => {
        0usize $( + usize::from($api.$field.is_some()) )*
    };
}

macro_rules! with_all_symbols {
    ($mac:ident!($target:expr)) => {
        $mac!($target;
            sdot, ddot, cdotu_sub, zdotu_sub, cdotc_sub, zdotc_sub,
            saxpy, daxpy, caxpy, zaxpy,
            sscal, dscal, cscal, zscal,
            scopy, dcopy, ccopy, zcopy,
            sswap, dswap, cswap, zswap,
            snrm2, dnrm2, scnrm2, dznrm2,
            sasum, dasum, scasum, dzasum,
            isamax, idamax, icamax, izamax,
            sgemv, dgemv, cgemv, zgemv,
            ssymv, dsymv, chemv, zhemv,
            sgemm, dgemm, cgemm, zgemm,
            ssymm, dsymm, csymm, zsymm, chemm, zhemm,
        )
    };
}

/// Look up one symbol, logging when it is absent.
///
/// # Safety
/// `F` must be the exact C signature of `name`.
unsafe fn symbol<F: Copy>(lib: &Library, name: &str) -> Option<F> {
    match lib.get::<F>(name.as_bytes()) {
        Ok(sym) => Some(*sym),
        Err(_) => {
            tracing::debug!(symbol = name, "CBLAS symbol not found");
            None
        }
    }
}

impl CblasApi {
    /// Resolve every known routine from `lib`.
    ///
    /// # Safety
    /// `lib` must export the standard CBLAS interface with 32-bit integers.
    /// The returned pointers are valid only while `lib` stays loaded.
    pub(crate) unsafe fn resolve(lib: &Library) -> Self {
        with_all_symbols!(resolve_symbols!(lib))
    }

    /// Number of routines found.
    pub(crate) fn count(&self) -> usize {
        with_all_symbols!(count_symbols!(self))
    }
}
