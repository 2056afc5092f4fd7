//! Error types for the approximation engine.

use kf_basis::BasisError;
use kf_sample::SampleError;
use thiserror::Error;

/// Errors that abort an approximation or forecast call.
///
/// Divergence during forecasting is NOT represented here; it is a normal
/// terminal outcome reported through `ForecastOutcome`.
#[derive(Error, Debug)]
pub enum ApproxError {
    #[error("Dimension mismatch: {what}")]
    DimensionMismatch { what: String },

    #[error("Unimplemented regression method: {method}")]
    UnimplementedMethod { method: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Basis error: {0}")]
    Basis(#[from] BasisError),

    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),
}

pub type ApproxResult<T> = Result<T, ApproxError>;
