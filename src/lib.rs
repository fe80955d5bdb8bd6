//! # denso
//!
//! Dense vectors and matrices over real and complex floats, with BLAS-style
//! kernels that run either on generic Rust loops or on a CBLAS library loaded
//! at runtime, plus fixed-step Runge-Kutta integrators that step without
//! allocating.
//!
//! ## Quick start
//!
//! ```
//! use denso::{Matrix, Vector};
//!
//! let a = Matrix::from_rows(&[
//!     [4.0_f64, 1.0],
//!     [1.0, 3.0],
//! ]);
//! let x = Vector::from_slice(&[1.0, 2.0]);
//!
//! // y = A x, allocating
//! let y = a.mat_vec(&x);
//! assert_eq!(y.as_slice(), &[6.0, 7.0]);
//!
//! // y += 2 A x, into an existing buffer
//! let mut acc = y.clone();
//! a.mat_vec_scaled_adding_into(&x, 2.0, &mut acc);
//! assert_eq!(acc.as_slice(), &[18.0, 21.0]);
//! ```
//!
//! ## Modules
//!
//! - [`vector`]: Heap-allocated `Vector<T>`. Level-1 operations (`dot`,
//!   conjugated `inner`, `add_multiplied`, norms), outer products, `xᵀ A`
//!   products and arithmetic operators.
//!
//! - [`matrix`]: Row-major `Matrix<T>` with runtime dimensions. Matrix-vector
//!   and matrix-matrix products, symmetric and Hermitian products reading only
//!   the upper triangle, Kronecker products, transpose, trace, and
//!   Gauss-Seidel / Jacobi iterations. Every product comes in the four
//!   destination forms described in [`kernels`].
//!
//! - [`kernels`]: Shape-checked entry points taking an explicit backend, and
//!   the [`ReferenceBackend`].
//!
//! - [`backend`]: The [`NumericBackend`] strategy trait, CBLAS flag enums,
//!   [`BackendConfig`] and the runtime-loaded [`AcceleratedBackend`].
//!
//! - [`ode`]: [`Rk2FixedStep`](ode::Rk2FixedStep) and
//!   [`Rk4FixedStep`](ode::Rk4FixedStep) over any [`OdeState`](ode::OdeState).
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all container elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, used for time, norms and tolerances
//!   - [`LinalgScalar`]: real floats and complex numbers, used by every kernel
//!
//! ## Backend selection
//!
//! `f32`, `f64`, `Complex<f32>` and `Complex<f64>` dispatch to a CBLAS library
//! when one can be loaded; every other element type, and every call when no
//! library is found, runs on the reference loops. Selection is controlled by
//! environment variables or [`backend::configure`]:
//!
//! | Variable                   | Effect |
//! |----------------------------|--------|
//! | `DENSO_BACKEND`            | `auto` (default), `reference` or `accelerated` |
//! | `DENSO_BLAS_LIBRARY`       | Library path(s) to try, in order |
//! | `DENSO_BLAS_MIN_ELEMENTS`  | Smallest operation routed to CBLAS |
//!
//! ## Cargo features
//!
//! | Feature   | Default | Description |
//! |-----------|---------|-------------|
//! | `serde`   | no      | `Serialize` / `Deserialize` for `Vector` and `Matrix` |

pub mod backend;
pub mod kernels;
pub mod matrix;
pub mod ode;
pub mod traits;
pub mod vector;

pub use backend::{AcceleratedBackend, BackendConfig, BackendError, BackendMode, NumericBackend, Side, Transpose};
pub use kernels::ReferenceBackend;
pub use matrix::{DimensionMismatch, Matrix};
pub use ode::{FirstStep, FixedStepIntegrator, OdeState, Rk2FixedStep, Rk4FixedStep};
pub use traits::{FloatScalar, LinalgScalar, Scalar};
pub use vector::Vector;

pub use num_complex::Complex;
