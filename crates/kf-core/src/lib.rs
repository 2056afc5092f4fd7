//! kf-core: stable foundation for koopflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)
//! - instrument (per-run stage timing and counters)

pub mod error;
pub mod instrument;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use instrument::{RunStats, StageTimer};
pub use numeric::*;
