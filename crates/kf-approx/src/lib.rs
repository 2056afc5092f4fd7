//! Koopman/eDMD linear approximation engine.
//!
//! Fits a single best-fit linear operator advancing extended observations one
//! step in time, then forecasts by repeated operator application:
//!
//! 1. Sample a trajectory of the true nonlinear system (kf-sample)
//! 2. Lift every sample into observation space (kf-basis)
//! 3. Regress `Y ≈ A·X` over consecutive observation pairs
//! 4. Roll `A` forward from an expanded initial state, with a divergence guard

pub mod engine;
pub mod error;
pub mod forecast;
pub mod regression;

pub use engine::{Koopman, KoopmanOptions};
pub use error::{ApproxError, ApproxResult};
pub use forecast::{Forecast, ForecastOptions, ForecastOutcome};
pub use regression::{fit_operator, RegressionMethod};
