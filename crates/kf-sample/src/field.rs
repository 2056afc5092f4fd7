//! VectorField trait for pluggable dynamical systems.

use kf_core::Real;
use nalgebra::DVector;

/// Trait for autonomous dynamical systems `x_dot = f(x)`.
///
/// Implementations must be pure: the derivative depends on the state alone
/// (no time argument, no interior mutability observable through `derivative`).
pub trait VectorField {
    /// Phase-space dimension of the system.
    fn dims(&self) -> usize;

    /// Compute the state derivative `x_dot = f(x)`.
    ///
    /// `state` has length `dims()`; the returned vector must too.
    fn derivative(&self, state: &DVector<Real>) -> DVector<Real>;
}

/// Adapter wrapping a plain closure as a `VectorField`.
pub struct FnField<F>
where
    F: Fn(&DVector<Real>) -> DVector<Real>,
{
    dims: usize,
    f: F,
}

impl<F> FnField<F>
where
    F: Fn(&DVector<Real>) -> DVector<Real>,
{
    pub fn new(dims: usize, f: F) -> Self {
        Self { dims, f }
    }
}

impl<F> VectorField for FnField<F>
where
    F: Fn(&DVector<Real>) -> DVector<Real>,
{
    fn dims(&self) -> usize {
        self.dims
    }

    fn derivative(&self, state: &DVector<Real>) -> DVector<Real> {
        (self.f)(state)
    }
}
