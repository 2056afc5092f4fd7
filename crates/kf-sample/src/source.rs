//! Training-data sources.

use crate::error::{SampleError, SampleResult};
use crate::field::VectorField;
use crate::integrator::{Integrator, RK4};
use kf_core::{ensure_all_finite, Real, RunStats, StageTimer};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// A time series of state vectors sampled from one simulation.
///
/// `states` has one column per sample (`dims x npoints`); column `i` was
/// sampled at `times[i]`. The first column equals the initial condition.
#[derive(Clone, Debug)]
pub struct Trajectory {
    pub times: Vec<Real>,
    pub states: DMatrix<Real>,
}

impl Trajectory {
    /// Phase-space dimension.
    pub fn dims(&self) -> usize {
        self.states.nrows()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.states.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.states.ncols() == 0
    }
}

/// Settings for sampling a single simulated trajectory.
///
/// All required fields are taken at construction; `validate` re-checks them
/// before any integration work starts.
#[derive(Clone, Debug)]
pub struct SingleTrajectory {
    /// Time horizon; samples span `[0, tmax]`
    pub tmax: Real,
    /// Number of samples, including the initial condition
    pub npoints: usize,
    /// Initial condition (length must match the field's dims)
    pub init: DVector<Real>,
    /// RK4 sub-steps per inter-sample interval
    pub substeps: usize,
}

impl SingleTrajectory {
    pub fn new(tmax: Real, npoints: usize, init: DVector<Real>) -> Self {
        Self {
            tmax,
            npoints,
            init,
            substeps: 8,
        }
    }

    /// Check that the settings describe a sensible sampling run.
    pub fn validate(&self) -> SampleResult<()> {
        if !self.tmax.is_finite() || self.tmax <= 0.0 {
            return Err(SampleError::InvalidArg {
                what: "tmax must be finite and positive",
            });
        }
        if self.npoints < 2 {
            return Err(SampleError::InvalidArg {
                what: "npoints must be at least 2",
            });
        }
        if self.init.is_empty() {
            return Err(SampleError::InvalidArg {
                what: "init must be non-empty",
            });
        }
        if self.substeps == 0 {
            return Err(SampleError::InvalidArg {
                what: "substeps must be positive",
            });
        }
        ensure_all_finite(self.init.as_slice(), "init")?;
        Ok(())
    }

    /// Integrate the field and return `npoints` states evenly spaced on
    /// `[0, tmax]`.
    ///
    /// Each inter-sample interval is integrated with `substeps` RK4 steps.
    pub fn sample<F: VectorField + ?Sized>(
        &self,
        field: &F,
        stats: &mut RunStats,
    ) -> SampleResult<Trajectory> {
        self.validate()?;

        if self.init.len() != field.dims() {
            return Err(SampleError::DimensionMismatch {
                what: "initial state length vs field dims",
                expected: field.dims(),
                got: self.init.len(),
            });
        }

        let timer = StageTimer::start();

        let n = field.dims();
        let dt_sample = self.tmax / (self.npoints - 1) as Real;
        let dt = dt_sample / self.substeps as Real;

        let mut times = Vec::with_capacity(self.npoints);
        let mut states = DMatrix::zeros(n, self.npoints);

        let mut x = self.init.clone();
        times.push(0.0);
        states.set_column(0, &x);

        for i in 1..self.npoints {
            for _ in 0..self.substeps {
                x = RK4.step(field, &x, dt);
            }
            ensure_all_finite(x.as_slice(), "sampled state")?;
            times.push(i as Real * dt_sample);
            states.set_column(i, &x);
        }

        stats.sample_time_s += timer.stop();
        stats.samples_taken += self.npoints;

        debug!(
            dims = n,
            npoints = self.npoints,
            tmax = self.tmax,
            "trajectory sampled"
        );

        Ok(Trajectory { times, states })
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
    fn sample_count_and_initial_condition() {
        let source = SingleTrajectory::new(1.0, 11, DVector::from_vec(vec![1.0, 0.0]));
        let mut stats = RunStats::default();
        let traj = source.sample(&harmonic(), &mut stats).unwrap();

        assert_eq!(traj.len(), 11);
        assert_eq!(traj.dims(), 2);
        assert_eq!(traj.states.column(0), DVector::from_vec(vec![1.0, 0.0]));
        assert_eq!(stats.samples_taken, 11);
    }

    #[test]
    fn times_evenly_spaced() {
        let source = SingleTrajectory::new(2.0, 5, DVector::from_vec(vec![1.0, 0.0]));
        let mut stats = RunStats::default();
        let traj = source.sample(&harmonic(), &mut stats).unwrap();

        assert_eq!(traj.times.len(), 5);
        for (i, &t) in traj.times.iter().enumerate() {
            assert!((t - 0.5 * i as Real).abs() < 1e-12);
        }
    }

    #[test]
    fn sampled_states_match_analytic_solution() {
        // Harmonic oscillator from [1, 0]: x(t) = cos(t), y(t) = -sin(t)
        let source = SingleTrajectory::new(3.0, 31, DVector::from_vec(vec![1.0, 0.0]));
        let mut stats = RunStats::default();
        let traj = source.sample(&harmonic(), &mut stats).unwrap();

        for (i, &t) in traj.times.iter().enumerate() {
            assert!((traj.states[(0, i)] - t.cos()).abs() < 1e-6);
            assert!((traj.states[(1, i)] + t.sin()).abs() < 1e-6);
        }
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let init = DVector::from_vec(vec![1.0, 0.0]);

        let source = SingleTrajectory::new(0.0, 10, init.clone());
        assert!(matches!(
            source.validate(),
            Err(SampleError::InvalidArg { .. })
        ));

        let source = SingleTrajectory::new(1.0, 1, init.clone());
        assert!(matches!(
            source.validate(),
            Err(SampleError::InvalidArg { .. })
        ));

        let source = SingleTrajectory::new(1.0, 10, DVector::from_vec(vec![1.0, Real::NAN]));
        assert!(matches!(
            source.validate(),
            Err(SampleError::NonFinite { .. })
        ));
    }

    #[test]
    fn sample_rejects_mismatched_init_length() {
        let source = SingleTrajectory::new(1.0, 10, DVector::from_vec(vec![1.0, 0.0, 0.0]));
        let mut stats = RunStats::default();
        let err = source.sample(&harmonic(), &mut stats).unwrap_err();
        assert!(matches!(err, SampleError::DimensionMismatch { .. }));
    }
}
