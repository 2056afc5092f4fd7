//! Observation-basis expansion for Koopman approximation.
//!
//! Maps raw state vectors into extended observation vectors according to a
//! validated, immutable basis configuration. The expansion is a pure function
//! of the state once the expander is constructed; the same ordering of basis
//! terms is used for training data and forecast-time expansion.

pub mod config;
pub mod error;
pub mod expander;

pub use config::BasisConfig;
pub use error::{BasisError, BasisResult};
pub use expander::Expander;
