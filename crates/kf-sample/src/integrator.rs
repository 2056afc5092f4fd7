//! Fixed-step time integrators.

use crate::field::VectorField;
use kf_core::Real;
use nalgebra::DVector;

/// Trait for fixed-step integrators over autonomous vector fields.
pub trait Integrator {
    /// Advance the state by one time step of size `dt`.
    fn step<F: VectorField + ?Sized>(&self, field: &F, x: &DVector<Real>, dt: Real)
        -> DVector<Real>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<F: VectorField + ?Sized>(
        &self,
        field: &F,
        x: &DVector<Real>,
        dt: Real,
    ) -> DVector<Real> {
        let k1 = field.derivative(x);
        let k2 = field.derivative(&(x + &k1 * (0.5 * dt)));
        let k3 = field.derivative(&(x + &k2 * (0.5 * dt)));
        let k4 = field.derivative(&(x + &k3 * dt));

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
    }
}

/// Forward Euler (explicit, 1st order, fast for testing).
/// Calls derivative() once per step instead of 4 times (RK4).
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<F: VectorField + ?Sized>(
        &self,
        field: &F,
        x: &DVector<Real>,
        dt: Real,
    ) -> DVector<Real> {
        let xdot = field.derivative(x);
        x + xdot * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FnField;

    fn harmonic() -> FnField<impl Fn(&DVector<Real>) -> DVector<Real>> {
        FnField::new(2, |s: &DVector<Real>| DVector::from_vec(vec![s[1], -s[0]]))
    }

    #[test]
    fn rk4_tracks_harmonic_oscillator() {
        // x(t) = cos(t), y(t) = -sin(t) from init [1, 0]
        let field = harmonic();
        let mut x = DVector::from_vec(vec![1.0, 0.0]);
        let dt = 0.01;
        let steps = 100;

        for _ in 0..steps {
            x = RK4.step(&field, &x, dt);
        }

        let t = dt * steps as Real;
        assert!((x[0] - t.cos()).abs() < 1e-8);
        assert!((x[1] + t.sin()).abs() < 1e-8);
    }

    #[test]
    fn euler_is_first_order() {
        let field = harmonic();
        let x0 = DVector::from_vec(vec![1.0, 0.0]);
        let x = ForwardEuler.step(&field, &x0, 0.1);

        // One Euler step: x stays, y picks up -x*dt
        assert_eq!(x[0], 1.0);
        assert!((x[1] + 0.1).abs() < 1e-15);
    }
}
