//! Fixed-step explicit Runge-Kutta integrators.
//!
//! Both integrators own their state and a set of scratch buffers cloned from
//! the initial state once, at construction. Every step then works through the
//! in-place operations of [`OdeState`] and a derivative function that writes
//! into a caller-provided buffer, `f(t, &y, &mut dy)`. For [`Vector`](crate::Vector)
//! and [`Matrix`](crate::Matrix) states, and `Vec`s or arrays of them, a step
//! performs no heap allocation.
//!
//! | Integrator        | Stages | Order | `step()` returns          |
//! |-------------------|--------|-------|---------------------------|
//! | [`Rk2FixedStep`]  |      2 | 2     | state *before* the step   |
//! | [`Rk4FixedStep`]  |      4 | 4     | state *after* the step ¹  |
//!
//! ¹ By default the very first call returns the initial state without
//! stepping; see [`FirstStep`].
//!
//! There is no error control and no step-size adaptation. Shape mismatches
//! between the state, the derivative output and the scratch buffers are
//! assertion failures.
//!
//! # Example
//!
//! ```
//! use denso::ode::{FixedStepIntegrator, Rk4FixedStep};
//! use denso::Vector;
//!
//! // Harmonic oscillator: y'' = -y  →  [y, y'] with dy/dt = [y', -y]
//! let y0 = Vector::from_slice(&[1.0_f64, 0.0]);
//! let tau = 2.0 * std::f64::consts::PI;
//! let steps = 1000;
//! let mut rk = Rk4FixedStep::new(y0, 0.0, tau / steps as f64,
//!     |_t, y: &Vector<f64>, dy: &mut Vector<f64>| {
//!         dy[0] = y[1];
//!         dy[1] = -y[0];
//!     });
//! rk.advance_by(steps);
//! assert!((rk.state()[0] - 1.0).abs() < 1e-9); // cos(2π) ≈ 1
//! assert!(rk.state()[1].abs() < 1e-9);         // sin(2π) ≈ 0
//! ```

mod rk2;
mod rk4;
mod state;


pub use rk2::Rk2FixedStep;
pub use rk4::Rk4FixedStep;
pub use state::OdeState;

/// What the first call to [`Rk4FixedStep::step`](FixedStepIntegrator::step)
/// returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FirstStep {
    /// Return `(t0, initial)` without advancing. Later calls advance.
    #[default]
    EmitInitial,
    /// Advance on every call, including the first.
    Advance,
}

/// Common interface of the fixed-step integrators.
pub trait FixedStepIntegrator {
    type State: OdeState;

    /// Perform one step and return a `(t, state)` pair. Which pair is
    /// returned depends on the integrator.
    fn step(&mut self) -> (<Self::State as OdeState>::Real, &Self::State);

    /// Advance one step, ignoring any first-call behavior of
    /// [`step`](FixedStepIntegrator::step).
    fn advance(&mut self);

    /// Advance `steps` times.
    fn advance_by(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance();
        }
    }

    /// Restart from `(t0, initial)`, keeping the step size, the derivative
    /// and the scratch buffers.
    ///
    /// Does not re-arm [`FirstStep::EmitInitial`] once `step` or `advance`
    /// has been called. Panics if `initial` differs in shape from the
    /// current state.
    fn reset(&mut self, initial: &Self::State, t0: <Self::State as OdeState>::Real);

    /// Current time.
    fn t(&self) -> <Self::State as OdeState>::Real;

    fn dt(&self) -> <Self::State as OdeState>::Real;

    /// Current state.
    fn state(&self) -> &Self::State;
}
