//! Error types for trajectory sampling.

use kf_core::CoreError;
use thiserror::Error;

/// Errors encountered while generating training trajectories.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Dimension mismatch: {what} (expected {expected}, got {got})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Non-finite state encountered: {what}")]
    NonFinite { what: &'static str },
}

pub type SampleResult<T> = Result<T, SampleError>;

impl From<CoreError> for SampleError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } => SampleError::NonFinite { what },
            CoreError::InvalidArg { what } => SampleError::InvalidArg { what },
            CoreError::Invariant { what } => SampleError::InvalidArg { what },
        }
    }
}
