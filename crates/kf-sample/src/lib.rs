//! Trajectory generation for Koopman approximation training data.
//!
//! Provides:
//! - `VectorField` trait for autonomous derivative functions
//! - Fixed-step RK4 / forward Euler integrators
//! - `SingleTrajectory` data source producing evenly-spaced state samples

pub mod error;
pub mod field;
pub mod integrator;
pub mod source;

pub use error::{SampleError, SampleResult};
pub use field::{FnField, VectorField};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use source::{SingleTrajectory, Trajectory};
