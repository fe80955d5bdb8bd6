use num_traits::One;

use super::{FixedStepIntegrator, OdeState};

/// Ralston's second-order method with a fixed step.
///
/// `k1 = f(t, y)`, `k2 = f(t + 2/3·dt, y + 2/3·dt·k1)`,
/// `y' = y + dt·(k1/4 + 3·k2/4)`.
///
/// [`step`](FixedStepIntegrator::step) returns the `(t, state)` pair from
/// *before* the step it performs. The returned state lives in a dedicated
/// buffer, so it stays valid while the integrator has moved on.
///
/// ```
/// use denso::ode::{FixedStepIntegrator, Rk2FixedStep};
/// use denso::Vector;
///
/// let y0 = Vector::from_slice(&[1.0_f64, 0.0]);
/// let mut rk = Rk2FixedStep::new(y0, 0.0, 0.01, |_t, y: &Vector<f64>, dy: &mut Vector<f64>| {
///     dy[0] = y[1];
///     dy[1] = -y[0];
/// });
/// let (t, y) = rk.step();
/// assert_eq!(t, 0.0);
/// assert_eq!(y.as_slice(), &[1.0, 0.0]);
/// assert!((rk.t() - 0.01).abs() < 1e-15);
/// ```
pub struct Rk2FixedStep<S: OdeState, F> {
    t: S::Real,
    dt: S::Real,
    state: S,
    previous: S,
    f: F,
    stage: S,
    k1: S,
    k2: S,
}

impl<S, F> Rk2FixedStep<S, F>
where
    S: OdeState,
    F: FnMut(S::Real, &S, &mut S),
{
    pub fn new(initial: S, t0: S::Real, dt: S::Real, f: F) -> Self {
        Self {
            t: t0,
            dt,
            previous: initial.clone(),
            stage: initial.clone(),
            k1: initial.clone(),
            k2: initial.clone(),
            state: initial,
            f,
        }
    }

    pub fn into_state(self) -> S {
        self.state
    }

    fn integrate(&mut self) {
        let one = S::Real::one();
        let two = one + one;
        let three = two + one;
        let four = two + two;

        let t = self.t;
        let dt = self.dt;
        let two_thirds = dt * two / three;

        (self.f)(t, &self.state, &mut self.k1);

        self.stage.copy_from_state(&self.state);
        self.stage.accumulate_scaled(&self.k1, two_thirds);
        (self.f)(t + two_thirds, &self.stage, &mut self.k2);

        self.state.accumulate_scaled(&self.k1, dt / four);
        self.state.accumulate_scaled(&self.k2, dt * three / four);
        self.t = t + dt;
    }
}

impl<S, F> FixedStepIntegrator for Rk2FixedStep<S, F>
where
    S: OdeState,
    F: FnMut(S::Real, &S, &mut S),
{
    type State = S;

    fn step(&mut self) -> (S::Real, &S) {
        let t = self.t;
        self.previous.copy_from_state(&self.state);
        self.integrate();
        (t, &self.previous)
    }

    fn advance(&mut self) {
        self.integrate();
    }

    fn reset(&mut self, initial: &S, t0: S::Real) {
        assert!(
            self.state.same_shape(initial),
            "state shape mismatch on reset"
        );
        self.state.copy_from_state(initial);
        self.t = t0;
    }

    fn t(&self) -> S::Real {
        self.t
    }

    fn dt(&self) -> S::Real {
        self.dt
    }

    fn state(&self) -> &S {
        &self.state
    }
}
