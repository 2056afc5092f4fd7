//! Approximation engine: sample, expand, fit.

use crate::error::ApproxResult;
use crate::regression::{fit_operator, RegressionMethod};
use kf_basis::{BasisConfig, Expander};
use kf_core::{Real, RunStats, StageTimer};
use kf_sample::{SingleTrajectory, VectorField};
use nalgebra::DMatrix;

/// Options controlling how the approximation is built.
#[derive(Clone, Debug, Default)]
pub struct KoopmanOptions {
    /// Observation basis configuration
    pub basis: BasisConfig,
    /// Regression strategy (default: pseudo-inverse)
    pub method: RegressionMethod,
}

/// A fitted finite-dimensional Koopman approximation.
///
/// Owns the derived expander and the fitted operator; both are immutable
/// after `fit`, so forecasts from different initial states may run
/// concurrently over a shared `&Koopman`.
#[derive(Debug)]
pub struct Koopman {
    expander: Expander,
    a_mat: DMatrix<Real>,
}

impl Koopman {
    /// Build the linear approximation from a sampled trajectory.
    ///
    /// Validates the data source before any integration work, then samples,
    /// lifts every sample into observation space, splits the lifted batch
    /// into the time-shifted pair (X, Y), and fits `Y ≈ A·X`. The trajectory
    /// is discarded once the operator is fit.
    pub fn fit<F: VectorField + ?Sized>(
        field: &F,
        source: &SingleTrajectory,
        options: &KoopmanOptions,
        stats: &mut RunStats,
    ) -> ApproxResult<Self> {
        source.validate()?;

        let expander = Expander::new(field.dims(), &options.basis)?;

        let trajectory = source.sample(field, stats)?;

        let timer = StageTimer::start();
        let eobs = expander.expand(&trajectory.states)?;
        stats.expand_time_s += timer.stop();
        stats.states_expanded += trajectory.len();

        // Y is X shifted by exactly one sample.
        let transitions = eobs.ncols() - 1;
        let x_mat = eobs.columns(0, transitions).into_owned();
        let y_mat = eobs.columns(1, transitions).into_owned();

        let timer = StageTimer::start();
        let a_mat = fit_operator(&x_mat, &y_mat, options.method)?;
        stats.fit_time_s += timer.stop();

        Ok(Self { expander, a_mat })
    }

    /// Phase-space dimension of the raw states.
    pub fn dims(&self) -> usize {
        self.expander.dims()
    }

    /// Length of the extended observation vectors.
    pub fn output_dims(&self) -> usize {
        self.expander.output_dims()
    }

    /// The observation expander this approximation was fit with.
    pub fn expander(&self) -> &Expander {
        &self.expander
    }

    /// The fitted one-step operator (`output_dims x output_dims`).
    pub fn operator(&self) -> &DMatrix<Real> {
        &self.a_mat
    }

    #[cfg(test)]
    pub(crate) fn from_parts(expander: Expander, a_mat: DMatrix<Real>) -> Self {
        Self { expander, a_mat }
    }
}
