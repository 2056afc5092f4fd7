//! Iterative forecasting in observation space.

use crate::engine::Koopman;
use crate::error::{ApproxError, ApproxResult};
use kf_core::{Real, RunStats, StageTimer};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for one forecast call.
#[derive(Clone, Debug)]
pub struct ForecastOptions {
    /// Number of operator applications (the result has up to `steps + 1` points)
    pub steps: usize,
    /// Divergence bound on the reported coordinate pair (default: unbounded)
    pub max_norm: Real,
    /// Observation coordinate reported as x
    pub xdim: usize,
    /// Observation coordinate reported as y
    pub ydim: usize,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            steps: 100,
            max_norm: Real::INFINITY,
            xdim: 0,
            ydim: 1,
        }
    }
}

/// How a forecast run terminated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ForecastOutcome {
    /// All requested steps were taken
    Completed,
    /// The reported-coordinate norm exceeded `max_norm` at `step`;
    /// the offending point is the last entry of the sequence
    Diverged { step: usize, norm: Real },
}

/// A (possibly truncated) forecast trajectory projected onto two
/// observation coordinates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Forecast {
    /// Reported coordinate pairs for steps `0..=k_stop`
    pub points: Vec<(Real, Real)>,
    pub outcome: ForecastOutcome,
}

impl Forecast {
    pub fn diverged(&self) -> bool {
        matches!(self.outcome, ForecastOutcome::Diverged { .. })
    }
}

impl Koopman {
    /// Forecast from an initial raw state by repeated operator application.
    ///
    /// The initial state is expanded once; each step multiplies the fitted
    /// operator into the current observation vector. After every step the
    /// Euclidean norm of the two reported coordinates is checked against
    /// `max_norm`; exceeding it ends the forecast early with a `Diverged`
    /// outcome, which is a reportable condition rather than an error. The
    /// engine is not mutated; repeated calls recompute the same sequence.
    pub fn forecast(
        &self,
        init: &DVector<Real>,
        options: &ForecastOptions,
        stats: &mut RunStats,
    ) -> ApproxResult<Forecast> {
        if init.len() != self.dims() {
            return Err(ApproxError::DimensionMismatch {
                what: format!(
                    "initial state length {} vs engine dims {}",
                    init.len(),
                    self.dims()
                ),
            });
        }
        if options.xdim >= self.output_dims() || options.ydim >= self.output_dims() {
            return Err(ApproxError::InvalidArg {
                what: "reporting coordinate index out of range",
            });
        }
        if options.max_norm.is_nan() {
            return Err(ApproxError::InvalidArg {
                what: "max_norm must not be NaN",
            });
        }

        let timer = StageTimer::start();

        let mut estate = self.expander().expand_state(init)?;
        let mut points = Vec::with_capacity(options.steps + 1);
        points.push((estate[options.xdim], estate[options.ydim]));

        let mut outcome = ForecastOutcome::Completed;

        for step in 1..=options.steps {
            estate = self.operator() * estate;

            let x = estate[options.xdim];
            let y = estate[options.ydim];
            points.push((x, y));

            let norm = x.hypot(y);
            if norm > options.max_norm {
                debug!(step, norm, max_norm = options.max_norm, "forecast diverged");
                outcome = ForecastOutcome::Diverged { step, norm };
                break;
            }
        }

        stats.forecast_time_s += timer.stop();
        stats.forecast_steps += points.len() - 1;

        Ok(Forecast { points, outcome })
    }
}
