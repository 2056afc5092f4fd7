//! Per-run instrumentation for the approximation pipeline.
//!
//! A `RunStats` value is created per approximation run and threaded `&mut`
//! through each stage; nothing here touches process-global state, so tests
//! that assert on stats stay deterministic. Summary printing is gated on the
//! `KF_TIMING` environment variable.

use std::time::Instant;

/// Check if timing output is enabled.
pub fn timing_enabled() -> bool {
    std::env::var("KF_TIMING").is_ok()
}

/// A simple timer that measures elapsed wall time for one stage.
pub struct StageTimer {
    start: Instant,
}

impl StageTimer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Stage timings and counters for one approximation run.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    /// Wall time spent sampling the training trajectory (seconds)
    pub sample_time_s: f64,
    /// Wall time spent expanding states into observations (seconds)
    pub expand_time_s: f64,
    /// Wall time spent in the regression step (seconds)
    pub fit_time_s: f64,
    /// Wall time spent forecasting (seconds, accumulated over calls)
    pub forecast_time_s: f64,
    /// Number of trajectory samples taken
    pub samples_taken: usize,
    /// Number of state vectors expanded (accumulated over calls)
    pub states_expanded: usize,
    /// Number of forecast steps executed (accumulated over calls)
    pub forecast_steps: usize,
}

impl RunStats {
    /// Total wall time across all recorded stages (seconds).
    pub fn total_seconds(&self) -> f64 {
        self.sample_time_s + self.expand_time_s + self.fit_time_s + self.forecast_time_s
    }

    /// Print a formatted summary if `KF_TIMING` is set.
    pub fn print_summary(&self) {
        if !timing_enabled() {
            return;
        }

        println!("\n=== Approximation Run Summary ===");
        println!(
            "Sample:   {:.3}s ({} samples)",
            self.sample_time_s, self.samples_taken
        );
        println!(
            "Expand:   {:.3}s ({} states)",
            self.expand_time_s, self.states_expanded
        );
        println!("Fit:      {:.3}s", self.fit_time_s);
        if self.forecast_steps > 0 {
            println!(
                "Forecast: {:.3}s ({} steps)",
                self.forecast_time_s, self.forecast_steps
            );
        }
        println!("Total:    {:.3}s", self.total_seconds());
        println!("=================================\n");
    }
}
