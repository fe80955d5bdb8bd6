use num_traits::One;

use super::{FirstStep, FixedStepIntegrator, OdeState};

/// Classic 4th-order Runge-Kutta with a fixed step.
///
/// Stage times `(t, t + dt/2, t + dt/2, t + dt)`, weights
/// `(1/6, 1/3, 1/3, 1/6)`. The derivative `f(t, y, dy)` writes `dy/dt`
/// into `dy` and must overwrite all of it.
///
/// Four derivative buffers and one stage buffer are cloned from the initial
/// state in [`new`](Rk4FixedStep::new); stepping allocates nothing beyond
/// what `f` and the state's own operations do.
///
/// ```
/// use denso::ode::{FirstStep, FixedStepIntegrator, Rk4FixedStep};
///
/// // dy/dt = -y
/// let mut rk = Rk4FixedStep::new(1.0_f64, 0.0, 0.1, |_t, y: &f64, dy: &mut f64| *dy = -*y)
///     .with_first_step(FirstStep::Advance);
/// rk.advance_by(9);
/// let (t, y) = rk.step();
/// assert!((t - 1.0).abs() < 1e-12);
/// assert!((*y - (-1.0_f64).exp()).abs() < 1e-6);
/// ```
pub struct Rk4FixedStep<S: OdeState, F> {
    t: S::Real,
    dt: S::Real,
    state: S,
    f: F,
    stage: S,
    k1: S,
    k2: S,
    k3: S,
    k4: S,
    first_step: FirstStep,
    started: bool,
}

impl<S, F> Rk4FixedStep<S, F>
where
    S: OdeState,
    F: FnMut(S::Real, &S, &mut S),
{
    /// Integrator starting at `(t0, initial)` with step `dt`.
    ///
    /// The first call to [`step`](FixedStepIntegrator::step) returns the
    /// initial state unchanged; see [`FirstStep`].
    pub fn new(initial: S, t0: S::Real, dt: S::Real, f: F) -> Self {
        Self {
            t: t0,
            dt,
            stage: initial.clone(),
            k1: initial.clone(),
            k2: initial.clone(),
            k3: initial.clone(),
            k4: initial.clone(),
            state: initial,
            f,
            first_step: FirstStep::default(),
            started: false,
        }
    }

    /// Choose what the first [`step`](FixedStepIntegrator::step) returns.
    pub fn with_first_step(mut self, first_step: FirstStep) -> Self {
        self.first_step = first_step;
        self
    }

    pub fn first_step(&self) -> FirstStep {
        self.first_step
    }

    /// Consume the integrator, returning the current state.
    pub fn into_state(self) -> S {
        self.state
    }

    fn integrate(&mut self) {
        let one = S::Real::one();
        let two = one + one;
        let three = two + one;

        let t = self.t;
        let dt = self.dt;
        let half = dt / two;
        let third = dt / three;
        let sixth = dt / (two * three);

        (self.f)(t, &self.state, &mut self.k1);

        self.stage.copy_from_state(&self.state);
        self.stage.accumulate_scaled(&self.k1, half);
        (self.f)(t + half, &self.stage, &mut self.k2);

        self.stage.copy_from_state(&self.state);
        self.stage.accumulate_scaled(&self.k2, half);
        (self.f)(t + half, &self.stage, &mut self.k3);

        self.stage.copy_from_state(&self.state);
        self.stage.accumulate_scaled(&self.k3, dt);
        (self.f)(t + dt, &self.stage, &mut self.k4);

        self.state.accumulate_scaled(&self.k1, sixth);
        self.state.accumulate_scaled(&self.k2, third);
        self.state.accumulate_scaled(&self.k3, third);
        self.state.accumulate_scaled(&self.k4, sixth);
        self.t = t + dt;
    }
}

impl<S, F> FixedStepIntegrator for Rk4FixedStep<S, F>
where
    S: OdeState,
    F: FnMut(S::Real, &S, &mut S),
{
    type State = S;

    /// Advance one step and return the new `(t, state)`.
    ///
    /// With [`FirstStep::EmitInitial`] the very first call returns the
    /// initial `(t0, state)` without advancing.
    fn step(&mut self) -> (S::Real, &S) {
        let first = !self.started;
        self.started = true;
        if !(first && self.first_step == FirstStep::EmitInitial) {
            self.integrate();
        }
        (self.t, &self.state)
    }

    fn advance(&mut self) {
        self.started = true;
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
