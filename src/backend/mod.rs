//! Kernel backends and process-wide backend resolution.
//!
//! Every kernel runs through a [`NumericBackend`]. The [`ReferenceBackend`]
//! (generic loops, any [`LinalgScalar`]) is always available. The
//! [`AcceleratedBackend`] is built once per process from a CBLAS shared
//! library found at runtime, and serves `f32`, `f64`, `Complex<f32>` and
//! `Complex<f64>`.
//!
//! Resolution is lazy: the first kernel call on a concrete element type reads
//! the [`BackendConfig`] (from [`configure`] or the environment) and tries to
//! load a library. The outcome is final for the lifetime of the process.
//!
//! ```
//! use denso::backend;
//!
//! // Either way, kernels work; this only reports which path they take.
//! let accelerated = backend::is_accelerated();
//! assert_eq!(accelerated, backend::accelerated().is_some());
//! ```
//!
//! [`ReferenceBackend`]: crate::kernels::ReferenceBackend

mod accelerated;
mod cblas;
mod config;
mod error;
pub(crate) mod shape;

pub use accelerated::AcceleratedBackend;
pub use config::{BackendConfig, BackendMode, ENV_BACKEND, ENV_LIBRARY, ENV_MIN_ELEMENTS};
pub use error::BackendError;

use std::os::raw::c_int;
use std::sync::OnceLock;

use crate::kernels::ReferenceBackend;
use crate::traits::LinalgScalar;

// ── CBLAS flags ─────────────────────────────────────────────────────

/// Storage order. Row-major everywhere except `xᵀ H`, which reads the
/// upper triangle as the lower triangle of a column-major `Hᵀ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Layout {
    RowMajor = 101,
    ColMajor = 102,
}

/// Operation applied to a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Transpose {
    NoTrans = 111,
    Trans = 112,
    ConjTrans = 113,
}

/// Which triangle of a symmetric/Hermitian operand is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Uplo {
    Upper = 121,
    Lower = 122,
}

/// Whether the symmetric/Hermitian operand is the left or right factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Side {
    Left = 141,
    Right = 142,
}

macro_rules! impl_flag_raw {
    ($($t:ty),*) => {
        $(
            impl $t {
                #[inline]
                pub(crate) fn raw(self) -> c_int {
                    self as c_int
                }
            }
        )*
    };
}

impl_flag_raw!(Layout, Transpose, Uplo, Side);

// ── Strategy trait ──────────────────────────────────────────────────

/// Primitive dense kernels over flat row-major buffers.
///
/// Callers guarantee shapes: `a` is `m x n` (or `n x n` for the symmetric
/// forms), slices have exactly the lengths implied by the dimensions. The
/// shape-checked entry points in [`kernels`](crate::kernels) assert this
/// before dispatch.
///
/// When `beta` is zero the destination is overwritten without being read.
///
/// Symmetric/Hermitian routines read only the upper triangle (including the
/// diagonal) of the square operand. Hermitian routines treat the imaginary
/// part of the diagonal as zero.
#[allow(clippy::too_many_arguments)]
pub trait NumericBackend<T: LinalgScalar>: Send + Sync {
    /// Short identifier for logs and benchmarks.
    fn name(&self) -> &'static str;

    /// `Σ x[i] * y[i]`
    fn dot(&self, x: &[T], y: &[T]) -> T;
    /// `Σ conj(x[i]) * y[i]`
    fn dotc(&self, x: &[T], y: &[T]) -> T;
    /// `y += alpha * x`
    fn axpy(&self, alpha: T, x: &[T], y: &mut [T]);
    /// `x *= alpha`
    fn scal(&self, alpha: T, x: &mut [T]);
    /// `y = x`
    fn copy(&self, x: &[T], y: &mut [T]);
    /// Exchange the contents of `x` and `y`.
    fn swap(&self, x: &mut [T], y: &mut [T]);
    /// Euclidean norm.
    fn nrm2(&self, x: &[T]) -> T::Real;
    /// `Σ (|re| + |im|)`
    fn asum(&self, x: &[T]) -> T::Real;
    /// First index maximizing `|re| + |im|`, `None` for an empty slice.
    fn iamax(&self, x: &[T]) -> Option<usize>;

    /// `y = alpha * op(A) * x + beta * y` with `A` stored `m x n`.
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
    );
    /// `y = alpha * S * x + beta * y`, `S` symmetric `n x n`.
    fn symv(&self, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]);
    /// `y = alpha * H * x + beta * y`, `H` Hermitian `n x n`.
    fn hemv(&self, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]);
    /// `y = alpha * Hᵀ * x + beta * y`, the row vector product `xᵀ H`.
    fn hemv_transposed(&self, n: usize, alpha: T, a: &[T], x: &[T], beta: T, y: &mut [T]);

    /// `C = alpha * A * B + beta * C`, `A: m x k`, `B: k x n`, `C: m x n`.
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
    );
    /// `C = alpha * S * B + beta * C` (left) or `alpha * B * S + beta * C`
    /// (right), `C: m x n`, `S` symmetric of order `m` (left) or `n` (right).
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
    );
    /// Hermitian counterpart of [`symm`](NumericBackend::symm).
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
    );
}

// ── Resolution ──────────────────────────────────────────────────────

static CONFIG: OnceLock<BackendConfig> = OnceLock::new();
static ACCELERATED: OnceLock<Option<AcceleratedBackend>> = OnceLock::new();

/// Install `config` for backend resolution.
///
/// Must run before the first kernel call on a concrete element type (and
/// before [`accelerated`] / [`is_accelerated`]); afterwards the backend is
/// fixed and this returns [`BackendError::AlreadyResolved`].
pub fn configure(config: BackendConfig) -> Result<(), BackendError> {
    CONFIG.set(config).map_err(|_| BackendError::AlreadyResolved)
}

/// The process-wide accelerated backend, resolving it on first call.
pub fn accelerated() -> Option<&'static AcceleratedBackend> {
    ACCELERATED
        .get_or_init(|| resolve(CONFIG.get_or_init(BackendConfig::from_env)))
        .as_ref()
}

/// Whether a CBLAS library backs the concrete element types.
pub fn is_accelerated() -> bool {
    accelerated().is_some()
}

/// Backend used for `T`: accelerated when loaded, reference otherwise.
pub(crate) fn select<T>() -> &'static dyn NumericBackend<T>
where
    T: LinalgScalar,
    AcceleratedBackend: NumericBackend<T>,
{
    match accelerated() {
        Some(backend) => backend,
        None => &ReferenceBackend,
    }
}

fn resolve(config: &BackendConfig) -> Option<AcceleratedBackend> {
    if config.mode == BackendMode::Reference {
        tracing::debug!("accelerated backend disabled; using reference kernels");
        return None;
    }

    match AcceleratedBackend::load(config) {
        Ok(backend) => {
            tracing::info!(
                library = backend.library(),
                routines = backend.routine_count(),
                min_elements = config.min_elements,
                "accelerated backend installed"
            );
            Some(backend)
        }
        Err(err) => {
            if config.mode == BackendMode::Accelerated {
                tracing::warn!(error = %err, "accelerated backend requested but unavailable; using reference kernels");
            } else {
                tracing::debug!(error = %err, "no accelerated backend; using reference kernels");
            }
            None
        }
    }
}
