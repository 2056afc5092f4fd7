//! Least-squares fitting of the one-step observation operator.

use crate::error::{ApproxError, ApproxResult};
use core::fmt;
use core::str::FromStr;
use kf_core::Real;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Singular values below this cutoff are treated as zero when inverting,
/// which keeps rank-deficient feature matrices from blowing up the fit.
const PINV_EPS: Real = 1e-12;

/// Regression strategy for fitting the operator.
///
/// Adding a strategy means adding a variant and its arm in `fit_operator`;
/// a variant without an arm fails with an explicit unimplemented-method
/// error rather than silently falling back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegressionMethod {
    /// Moore-Penrose pseudo-inverse: `A = Y · pinv(X)`
    #[default]
    PseudoInverse,
    /// Tikhonov-regularized least squares (declared, not yet implemented)
    Ridge,
}

impl fmt::Display for RegressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionMethod::PseudoInverse => write!(f, "pseudo-inverse"),
            RegressionMethod::Ridge => write!(f, "ridge"),
        }
    }
}

impl FromStr for RegressionMethod {
    type Err = ApproxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pinv" | "pseudo-inverse" => Ok(RegressionMethod::PseudoInverse),
            "ridge" => Ok(RegressionMethod::Ridge),
            other => Err(ApproxError::UnimplementedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Fit the least-squares operator `A` minimizing `||Y - A·X||_F`.
///
/// `x` and `y` must have identical shape with at least one column; column
/// `i` of `y` is the observation one sample after column `i` of `x`.
pub fn fit_operator(
    x: &DMatrix<Real>,
    y: &DMatrix<Real>,
    method: RegressionMethod,
) -> ApproxResult<DMatrix<Real>> {
    if x.shape() != y.shape() {
        return Err(ApproxError::DimensionMismatch {
            what: format!(
                "feature matrices must match: X is {}x{}, Y is {}x{}",
                x.nrows(),
                x.ncols(),
                y.nrows(),
                y.ncols()
            ),
        });
    }
    if x.ncols() == 0 {
        return Err(ApproxError::DimensionMismatch {
            what: "at least one transition pair is required".to_string(),
        });
    }

    match method {
        RegressionMethod::PseudoInverse => {
            let x_pinv = x
                .clone()
                .pseudo_inverse(PINV_EPS)
                .map_err(|e| ApproxError::Numeric {
                    what: format!("pseudo-inverse failed: {e}"),
                })?;
            let a_mat = y * x_pinv;

            debug!(
                x_shape = ?x.shape(),
                a_shape = ?a_mat.shape(),
                "operator fitted"
            );

            Ok(a_mat)
        }
        RegressionMethod::Ridge => Err(ApproxError::UnimplementedMethod {
            method: method.to_string(),
        }),
    }
}
