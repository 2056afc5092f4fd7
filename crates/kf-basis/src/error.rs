//! Error types for basis configuration and expansion.

use thiserror::Error;

/// Errors from building or applying an observation basis.
#[derive(Error, Debug)]
pub enum BasisError {
    #[error("Invalid dimension count: dims must be at least 1")]
    InvalidDims,

    #[error("Invalid basis order: {what}")]
    InvalidOrder { what: &'static str },

    #[error("Basis family not yet supported: {family}")]
    UnsupportedBasis { family: &'static str },

    #[error("Dimension mismatch: {what} (expected {expected}, got {got})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}

pub type BasisResult<T> = Result<T, BasisError>;
