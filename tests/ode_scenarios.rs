use denso::{Complex, FirstStep, FixedStepIntegrator, Matrix, Rk2FixedStep, Rk4FixedStep, Side, Vector};

type C = Complex<f64>;

fn decay(_t: f64, y: &Vector<f64>, dy: &mut Vector<f64>) {
    dy.copy_from(y);
    dy.scale(-1.0);
}

#[test]
fn exponential_decay_reaches_inverse_e() {
    let mut rk = Rk4FixedStep::new(Vector::fill(3, 1.0), 0.0, 0.1, decay).with_first_step(FirstStep::Advance);
    let mut last = 0.0;
    for _ in 0..10 {
        let (t, y) = rk.step();
        last = t;
        assert!(y.iter().all(|&v| v > 0.0 && v < 1.0));
    }
    assert!((last - 1.0).abs() < 1e-12);
    for &v in rk.state().iter() {
        assert!((v - (-1.0_f64).exp()).abs() < 1e-3);
    }
}

#[test]
fn linear_system_matches_amplification_factor() {
    // y' = λ y for several λ at once, through a diagonal matrix
    let lambdas = [-2.0, -0.5, 0.0, 0.3];
    let a = Matrix::diagonal(&lambdas);
    let dt = 0.01;
    let n = 300;
    let mut rk = Rk4FixedStep::new(Vector::fill(4, 1.0), 0.0, dt, |_t, y: &Vector<f64>, dy: &mut Vector<f64>| {
        a.mat_vec_into(y, dy);
    });
    rk.advance_by(n);

    for (i, &lambda) in lambdas.iter().enumerate() {
        let z: f64 = lambda * dt;
        let r = 1.0 + z + z.powi(2) / 2.0 + z.powi(3) / 6.0 + z.powi(4) / 24.0;
        let expected = r.powi(n as i32);
        assert!((rk.state()[i] - expected).abs() < 1e-10, "λ = {}", lambda);
    }
}

#[test]
fn rk4_beats_rk2_at_equal_step() {
    let exact = (-1.0_f64).exp();
    let mut rk2 = Rk2FixedStep::new(Vector::fill(1, 1.0), 0.0, 0.05, decay);
    let mut rk4 = Rk4FixedStep::new(Vector::fill(1, 1.0), 0.0, 0.05, decay);
    rk2.advance_by(20);
    rk4.advance_by(20);
    let e2 = (rk2.state()[0] - exact).abs();
    let e4 = (rk4.state()[0] - exact).abs();
    assert!(e4 < e2 / 100.0, "rk2 {} rk4 {}", e2, e4);
    assert!(e2 < 1e-3);
}

#[test]
fn unitary_evolution_preserves_norm() {
    // i dψ/dt = H ψ with a real symmetric (hence Hermitian) H
    let n = 5;
    let h = Matrix::from_fn(n, n, |i, j| {
        let d = i.abs_diff(j) as f64;
        C::new(1.0 / (1.0 + d), 0.0)
    });
    let minus_i = C::new(0.0, -1.0);
    let psi0 = Vector::from_fn(n, |k| if k == 0 { C::new(1.0, 0.0) } else { C::new(0.0, 0.0) });

    let mut rk = Rk4FixedStep::new(psi0, 0.0, 0.01, |_t, psi: &Vector<C>, dpsi: &mut Vector<C>| {
        h.hermitian_mat_vec_scaled_into(psi, minus_i, dpsi);
    });
    rk.advance_by(500);
    assert!((rk.state().norm() - 1.0).abs() < 1e-8);
    assert!((rk.t() - 5.0).abs() < 1e-10);
}

#[test]
fn matrix_riccati_like_flow() {
    // dX/dt = A X + X Aᵀ with symmetric A keeps X symmetric
    let a = Matrix::from_rows(&[[-1.0, 0.5, 0.0], [0.5, -2.0, 0.25], [0.0, 0.25, -0.5]]);
    let x0 = Matrix::identity(3);
    let mut rk = Rk4FixedStep::new(x0, 0.0, 0.01, |_t, x: &Matrix<f64>, dx: &mut Matrix<f64>| {
        a.symmetric_mat_mul_into(Side::Left, x, dx);
        a.symmetric_mat_mul_adding_into(Side::Right, x, dx);
    });
    rk.advance_by(100);
    let x = rk.state();
    assert!(x.is_approx_eq(&x.transpose(), 1e-12, 0.0));
    // solution is exp(A t) exp(A t)ᵀ = exp(2 A t): trace decays
    assert!(x.trace() < 3.0 && x.trace() > 0.0);
}

#[test]
fn rk2_trajectory_pairs() {
    let mut rk = Rk2FixedStep::new(Vector::fill(2, 1.0), 0.0, 0.1, decay);
    let mut times = Vec::new();
    let mut values = Vec::new();
    for _ in 0..3 {
        let (t, y) = rk.step();
        times.push(t);
        values.push(y[0]);
    }
    assert_eq!(times[0], 0.0);
    assert!((times[2] - 0.2).abs() < 1e-15);
    assert_eq!(values[0], 1.0);
    assert!(values[1] < values[0] && values[2] < values[1]);
}

#[test]
fn reset_reuses_buffers() {
    let mut rk = Rk4FixedStep::new(Vector::fill(2, 1.0), 0.0, 0.1, decay);
    rk.advance_by(5);
    rk.reset(&Vector::fill(2, 2.0), 10.0);
    assert_eq!(rk.t(), 10.0);
    assert_eq!(rk.state().as_slice(), &[2.0, 2.0]);
    rk.advance();
    assert!((rk.state()[0] - 2.0 * (-0.1_f64).exp()).abs() < 1e-6);
}
