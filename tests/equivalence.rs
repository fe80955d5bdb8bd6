//! Reference kernels against a loaded CBLAS library.
//!
//! Each test loads its own [`AcceleratedBackend`] with `min_elements = 0`,
//! so every size goes through CBLAS. Without a loadable library the tests
//! log a warning and pass, unless `DENSO_REQUIRE_BLAS` is set, in which case
//! they fail.

use denso::backend::BackendMode;
use denso::{kernels, AcceleratedBackend, BackendConfig, LinalgScalar, Matrix, NumericBackend, ReferenceBackend, Side, Transpose, Vector};
use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: &[usize] = &[1, 2, 3, 17, 128];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn accelerated() -> Option<AcceleratedBackend> {
    init_tracing();
    let config = BackendConfig {
        mode: BackendMode::Accelerated,
        min_elements: 0,
        ..BackendConfig::from_env()
    };
    match AcceleratedBackend::load(&config) {
        Ok(backend) => Some(backend),
        Err(err) if std::env::var_os("DENSO_REQUIRE_BLAS").is_some() => {
            panic!("DENSO_REQUIRE_BLAS is set but no CBLAS library loaded: {}", err)
        }
        Err(err) => {
            tracing::warn!(%err, "skipping reference/accelerated comparison");
            None
        }
    }
}

/// Element types with a CBLAS binding, plus what the comparison needs.
trait Sample: LinalgScalar {
    /// Tolerance relative to the sum of absolute terms.
    const RTOL: f64;

    fn sample(rng: &mut StdRng) -> Self;

    /// `|self|` as an element of the same type.
    fn magnitude(self) -> Self;

    fn size(self) -> f64;

    fn distance(self, other: Self) -> f64 {
        (self - other).size()
    }
}

macro_rules! impl_sample_real {
    ($t:ty, $rtol:expr) => {
        impl Sample for $t {
            const RTOL: f64 = $rtol;

            fn sample(rng: &mut StdRng) -> Self {
                rng.gen_range(-1.0..1.0)
            }

            fn magnitude(self) -> Self {
                self.abs()
            }

            fn size(self) -> f64 {
                self.abs() as f64
            }
        }
    };
}

macro_rules! impl_sample_complex {
    ($t:ty, $rtol:expr) => {
        impl Sample for Complex<$t> {
            const RTOL: f64 = $rtol;

            fn sample(rng: &mut StdRng) -> Self {
                Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
            }

            fn magnitude(self) -> Self {
                Complex::new(self.norm(), 0.0)
            }

            fn size(self) -> f64 {
                self.norm() as f64
            }
        }
    };
}

impl_sample_real!(f32, 1e-6);
impl_sample_real!(f64, 1e-12);
impl_sample_complex!(f32, 1e-6);
impl_sample_complex!(f64, 1e-12);

// ── Helpers ─────────────────────────────────────────────────────────

fn random_vector<T: Sample>(rng: &mut StdRng, n: usize) -> Vector<T> {
    Vector::from_fn(n, |_| T::sample(rng))
}

fn random_matrix<T: Sample>(rng: &mut StdRng, rows: usize, columns: usize) -> Matrix<T> {
    Matrix::from_fn(rows, columns, |_, _| T::sample(rng))
}

fn abs_vector<T: Sample>(v: &Vector<T>) -> Vector<T> {
    Vector::from_fn(v.len(), |i| v[i].magnitude())
}

fn abs_matrix<T: Sample>(m: &Matrix<T>) -> Matrix<T> {
    Matrix::from_fn(m.rows(), m.columns(), |i, j| m[(i, j)].magnitude())
}

#[track_caller]
fn assert_close<T: Sample>(what: &str, got: &[T], expected: &[T], scale: &[T]) {
    assert_eq!(got.len(), expected.len(), "{}", what);
    for (i, ((&g, &e), &s)) in got.iter().zip(expected).zip(scale).enumerate() {
        let tol = T::RTOL * s.size();
        assert!(
            g.distance(e) <= tol,
            "{} [{}]: {:?} vs {:?} (tol {:e})",
            what,
            i,
            g,
            e,
            tol
        );
    }
}

#[track_caller]
fn assert_close_real(what: &str, got: f64, expected: f64, rtol: f64) {
    assert!(
        (got - expected).abs() <= rtol * expected.abs(),
        "{}: {} vs {}",
        what,
        got,
        expected
    );
}

// ── Checks ──────────────────────────────────────────────────────────

fn level1<T: Sample>(acc: &dyn NumericBackend<T>, rng: &mut StdRng, n: usize) {
    let reference: &dyn NumericBackend<T> = &ReferenceBackend;
    let x = random_vector::<T>(rng, n);
    let y = random_vector::<T>(rng, n);
    let alpha = T::sample(rng);
    let what = |op: &str| format!("{} n={}", op, n);

    // Σ |x||y| bounds both dot variants
    let scale = [kernels::dot(reference, &abs_vector(&x), &abs_vector(&y))];
    let got = [kernels::dot(acc, &x, &y)];
    let expected = [kernels::dot(reference, &x, &y)];
    assert_close(&what("dot"), &got, &expected, &scale);
    let got = [kernels::inner(acc, &x, &y)];
    let expected = [kernels::inner(reference, &x, &y)];
    assert_close(&what("dotc"), &got, &expected, &scale);

    let mut got = y.clone();
    kernels::axpy(acc, alpha, x.as_slice(), got.as_mut_slice());
    let mut expected = y.clone();
    kernels::axpy(reference, alpha, x.as_slice(), expected.as_mut_slice());
    let mut scale = abs_vector(&y);
    kernels::axpy(reference, alpha.magnitude(), abs_vector(&x).as_slice(), scale.as_mut_slice());
    assert_close(&what("axpy"), got.as_slice(), expected.as_slice(), scale.as_slice());

    let mut got = x.clone();
    acc.scal(alpha, got.as_mut_slice());
    let mut expected = x.clone();
    reference.scal(alpha, expected.as_mut_slice());
    let mut scale = abs_vector(&x);
    reference.scal(alpha.magnitude(), scale.as_mut_slice());
    assert_close(&what("scal"), got.as_slice(), expected.as_slice(), scale.as_slice());

    let mut a = x.clone();
    let mut b = y.clone();
    kernels::swap(acc, a.as_mut_slice(), b.as_mut_slice());
    assert_eq!((&a, &b), (&y, &x), "{}", what("swap"));
    kernels::copy(acc, x.as_slice(), a.as_mut_slice());
    assert_eq!(a, x, "{}", what("copy"));

    // reductions of n positive terms
    let rtol = T::RTOL * (n as f64).sqrt();
    let got = acc.nrm2(x.as_slice());
    let expected = reference.nrm2(x.as_slice());
    assert_close_real(&what("nrm2"), T::from_real(got).size(), T::from_real(expected).size(), rtol);
    let got = acc.asum(x.as_slice());
    let expected = reference.asum(x.as_slice());
    assert_close_real(&what("asum"), T::from_real(got).size(), T::from_real(expected).size(), rtol);

    assert_eq!(acc.iamax(x.as_slice()), reference.iamax(x.as_slice()), "{}", what("iamax"));
}

fn level2<T: Sample>(acc: &dyn NumericBackend<T>, rng: &mut StdRng, n: usize) {
    let reference: &dyn NumericBackend<T> = &ReferenceBackend;
    let m = n + 1;
    let a = random_matrix::<T>(rng, m, n);
    let x = random_vector::<T>(rng, n);
    let xt = random_vector::<T>(rng, m);
    let alpha = T::sample(rng);
    let beta = T::sample(rng);

    // y = α A x + β y
    let y0 = random_vector::<T>(rng, m);
    let mut got = y0.clone();
    kernels::mat_vec(acc, alpha, &a, &x, beta, &mut got);
    let mut expected = y0.clone();
    kernels::mat_vec(reference, alpha, &a, &x, beta, &mut expected);
    let mut scale = abs_vector(&y0);
    kernels::mat_vec(reference, alpha.magnitude(), &abs_matrix(&a), &abs_vector(&x), beta.magnitude(), &mut scale);
    assert_close(&format!("gemv {}x{}", m, n), got.as_slice(), expected.as_slice(), scale.as_slice());

    // y = α xᵀ A, NaN destination must be ignored with β = 0
    let mut got = Vector::fill(n, T::from_real(<T::Real as num_traits::Float>::nan()));
    kernels::vec_mat(acc, alpha, &xt, &a, T::zero(), &mut got);
    let mut expected = Vector::zeros(n);
    kernels::vec_mat(reference, alpha, &xt, &a, T::zero(), &mut expected);
    let mut scale = Vector::zeros(n);
    kernels::vec_mat(reference, alpha.magnitude(), &abs_vector(&xt), &abs_matrix(&a), T::zero(), &mut scale);
    assert_close(&format!("gemv-t {}x{}", m, n), got.as_slice(), expected.as_slice(), scale.as_slice());

    // conjugate transpose through the backend directly
    let mut got = Vector::zeros(n);
    acc.gemv(Transpose::ConjTrans, m, n, alpha, a.as_slice(), xt.as_slice(), T::zero(), got.as_mut_slice());
    let mut expected = Vector::zeros(n);
    reference.gemv(Transpose::ConjTrans, m, n, alpha, a.as_slice(), xt.as_slice(), T::zero(), expected.as_mut_slice());
    assert_close(&format!("gemv-h {}x{}", m, n), got.as_slice(), expected.as_slice(), scale.as_slice());

    // symmetric / Hermitian, square n
    let s = random_matrix::<T>(rng, n, n);
    let y0 = random_vector::<T>(rng, n);
    let mut scale = abs_vector(&y0);
    kernels::symmetric_mat_vec(reference, alpha.magnitude(), &abs_matrix(&s), &abs_vector(&x), beta.magnitude(), &mut scale);

    let mut got = y0.clone();
    kernels::symmetric_mat_vec(acc, alpha, &s, &x, beta, &mut got);
    let mut expected = y0.clone();
    kernels::symmetric_mat_vec(reference, alpha, &s, &x, beta, &mut expected);
    assert_close(&format!("symv {}", n), got.as_slice(), expected.as_slice(), scale.as_slice());

    let mut got = y0.clone();
    kernels::hermitian_mat_vec(acc, alpha, &s, &x, beta, &mut got);
    let mut expected = y0.clone();
    kernels::hermitian_mat_vec(reference, alpha, &s, &x, beta, &mut expected);
    assert_close(&format!("hemv {}", n), got.as_slice(), expected.as_slice(), scale.as_slice());

    // xᵀ H
    let mut got = y0.clone();
    kernels::hermitian_vec_mat(acc, alpha, &x, &s, beta, &mut got);
    let mut expected = y0.clone();
    kernels::hermitian_vec_mat(reference, alpha, &x, &s, beta, &mut expected);
    assert_close(&format!("hemv-t {}", n), got.as_slice(), expected.as_slice(), scale.as_slice());
}

fn level3<T: Sample>(acc: &dyn NumericBackend<T>, rng: &mut StdRng, n: usize) {
    let reference: &dyn NumericBackend<T> = &ReferenceBackend;
    let alpha = T::sample(rng);
    let beta = T::sample(rng);

    for (m, k, p) in [(n, n, n), (n, 3, n + 1), (2, n, 1)] {
        let a = random_matrix::<T>(rng, m, k);
        let b = random_matrix::<T>(rng, k, p);
        let c0 = random_matrix::<T>(rng, m, p);

        let mut got = c0.clone();
        kernels::mat_mul(acc, alpha, &a, &b, beta, &mut got);
        let mut expected = c0.clone();
        kernels::mat_mul(reference, alpha, &a, &b, beta, &mut expected);
        let mut scale = abs_matrix(&c0);
        kernels::mat_mul(reference, alpha.magnitude(), &abs_matrix(&a), &abs_matrix(&b), beta.magnitude(), &mut scale);
        assert_close(&format!("gemm {}x{}x{}", m, k, p), got.as_slice(), expected.as_slice(), scale.as_slice());
    }

    let s = random_matrix::<T>(rng, n, n);
    for (side, rows, columns) in [(Side::Left, n, 3), (Side::Right, 2, n)] {
        let b = random_matrix::<T>(rng, rows, columns);
        let c0 = random_matrix::<T>(rng, rows, columns);
        let mut scale = abs_matrix(&c0);
        kernels::symmetric_mat_mul(reference, side, alpha.magnitude(), &abs_matrix(&s), &abs_matrix(&b), beta.magnitude(), &mut scale);

        let mut got = c0.clone();
        kernels::symmetric_mat_mul(acc, side, alpha, &s, &b, beta, &mut got);
        let mut expected = c0.clone();
        kernels::symmetric_mat_mul(reference, side, alpha, &s, &b, beta, &mut expected);
        assert_close(&format!("symm {:?} {}", side, n), got.as_slice(), expected.as_slice(), scale.as_slice());

        let mut got = c0.clone();
        kernels::hermitian_mat_mul(acc, side, alpha, &s, &b, beta, &mut got);
        let mut expected = c0.clone();
        kernels::hermitian_mat_mul(reference, side, alpha, &s, &b, beta, &mut expected);
        assert_close(&format!("hemm {:?} {}", side, n), got.as_slice(), expected.as_slice(), scale.as_slice());
    }
}

fn run_all<T: Sample>(acc: &AcceleratedBackend, seed: u64)
where
    AcceleratedBackend: NumericBackend<T>,
{
    let acc: &dyn NumericBackend<T> = acc;
    let mut rng = StdRng::seed_from_u64(seed);
    for &n in SIZES {
        level1::<T>(acc, &mut rng, n);
        level2::<T>(acc, &mut rng, n);
        level3::<T>(acc, &mut rng, n);
    }
}

#[test]
fn f32_kernels_agree() {
    let Some(acc) = accelerated() else { return };
    run_all::<f32>(&acc, 1);
}

#[test]
fn f64_kernels_agree() {
    let Some(acc) = accelerated() else { return };
    run_all::<f64>(&acc, 2);
}

#[test]
fn complex32_kernels_agree() {
    let Some(acc) = accelerated() else { return };
    run_all::<Complex<f32>>(&acc, 3);
}

#[test]
fn complex64_kernels_agree() {
    let Some(acc) = accelerated() else { return };
    run_all::<Complex<f64>>(&acc, 4);
}

#[test]
fn below_threshold_runs_reference() {
    let Some(_) = accelerated() else { return };
    let config = BackendConfig {
        mode: BackendMode::Accelerated,
        min_elements: usize::MAX,
        ..BackendConfig::from_env()
    };
    let Ok(acc) = AcceleratedBackend::load(&config) else { return };
    let acc: &dyn NumericBackend<f64> = &acc;
    let reference: &dyn NumericBackend<f64> = &ReferenceBackend;

    let mut rng = StdRng::seed_from_u64(5);
    let a = random_matrix::<f64>(&mut rng, 17, 17);
    let b = random_matrix::<f64>(&mut rng, 17, 17);
    let mut got = Matrix::zeros(17, 17);
    kernels::mat_mul(acc, 1.0, &a, &b, 0.0, &mut got);
    let mut expected = Matrix::zeros(17, 17);
    kernels::mat_mul(reference, 1.0, &a, &b, 0.0, &mut expected);
    // same loops, same bits
    assert_eq!(got, expected);
}
