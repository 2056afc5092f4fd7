use clap::{Parser, Subcommand};
use kf_approx::{Forecast, ForecastOptions, ForecastOutcome, Koopman, KoopmanOptions};
use kf_basis::BasisConfig;
use kf_core::{Real, RunStats};
use kf_sample::{FnField, SingleTrajectory};
use nalgebra::DVector;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kf-cli")]
#[command(about = "Koopman eDMD approximation tool for nonlinear dynamics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit and forecast the Van der Pol oscillator demo
    Vanderpol {
        /// Simulation time horizon in seconds
        #[arg(long, default_value_t = 6.5)]
        tmax: f64,
        /// Number of trajectory samples
        #[arg(long, default_value_t = 100)]
        npoints: usize,
        /// Forecast steps
        #[arg(long, default_value_t = 100)]
        steps: usize,
        /// Divergence bound on the forecast norm
        #[arg(long, default_value_t = 10.0)]
        max_norm: f64,
        /// Add a power basis of this order to the raw state
        #[arg(long)]
        power_order: Option<usize>,
        /// Regression method (pinv, ridge)
        #[arg(long, default_value = "pinv")]
        method: String,
        /// Write (step, x, y) rows as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write a JSON forecast report
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write a phase-portrait PNG
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Fit a linear harmonic oscillator and report operator recovery error
    Linear {
        /// Simulation time horizon in seconds
        #[arg(long, default_value_t = 1.0)]
        tmax: f64,
        /// Number of trajectory samples
        #[arg(long, default_value_t = 50)]
        npoints: usize,
        /// Forecast steps
        #[arg(long, default_value_t = 20)]
        steps: usize,
    },
}

/// Serialized forecast run, for downstream tooling.
#[derive(Serialize)]
struct ForecastReport {
    dims: usize,
    output_dims: usize,
    method: String,
    steps_requested: usize,
    steps_returned: usize,
    diverged: bool,
    diverged_step: Option<usize>,
    points: Vec<(Real, Real)>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Vanderpol {
            tmax,
            npoints,
            steps,
            max_norm,
            power_order,
            method,
            csv,
            json,
            plot,
        } => cmd_vanderpol(
            tmax,
            npoints,
            steps,
            max_norm,
            power_order,
            &method,
            csv.as_deref(),
            json.as_deref(),
            plot.as_deref(),
        ),
        Commands::Linear {
            tmax,
            npoints,
            steps,
        } => cmd_linear(tmax, npoints, steps),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_vanderpol(
    tmax: f64,
    npoints: usize,
    steps: usize,
    max_norm: f64,
    power_order: Option<usize>,
    method: &str,
    csv: Option<&Path>,
    json: Option<&Path>,
    plot: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    println!("Fitting Van der Pol approximation (tmax={tmax}, npoints={npoints})");

    let field = FnField::new(2, |s: &DVector<Real>| {
        let (x, y) = (s[0], s[1]);
        DVector::from_vec(vec![y, y - x - x * x * y])
    });
    let init = DVector::from_vec(vec![1.4, 2.4]);
    let source = SingleTrajectory::new(tmax, npoints, init.clone());

    let options = KoopmanOptions {
        basis: match power_order {
            Some(order) => BasisConfig::with_power_order(order),
            None => BasisConfig::raw_only(),
        },
        method: method.parse()?,
    };

    let mut stats = RunStats::default();
    let koop = Koopman::fit(&field, &source, &options, &mut stats)?;
    println!(
        "✓ Operator fitted: {} -> {} observation dims",
        koop.dims(),
        koop.output_dims()
    );

    let forecast = koop.forecast(
        &init,
        &ForecastOptions {
            steps,
            max_norm,
            ..ForecastOptions::default()
        },
        &mut stats,
    )?;

    match forecast.outcome {
        ForecastOutcome::Completed => {
            println!("✓ Forecast completed: {} points", forecast.points.len());
        }
        ForecastOutcome::Diverged { step, norm } => {
            println!(
                "! Forecast diverged at step {step} (norm {norm:.3} > {max_norm}); {} points kept",
                forecast.points.len()
            );
        }
    }

    if let Some(path) = csv {
        export_csv(path, &forecast)?;
        println!("✓ Wrote CSV: {}", path.display());
    }

    if let Some(path) = json {
        let report = build_report(&koop, &options, steps, &forecast);
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("✓ Wrote JSON report: {}", path.display());
    }

    if let Some(path) = plot {
        let truth = source.sample(&field, &mut stats)?;
        let sim: Vec<(Real, Real)> = (0..truth.len())
            .map(|i| (truth.states[(0, i)], truth.states[(1, i)]))
            .collect();
        kf_plot::plot_phase_portrait(path, &sim, &forecast.points, "Van der Pol eDMD")?;
        println!("✓ Wrote plot: {}", path.display());
    }

    stats.print_summary();
    Ok(())
}

fn cmd_linear(tmax: f64, npoints: usize, steps: usize) -> Result<(), Box<dyn Error>> {
    println!("Fitting harmonic oscillator (tmax={tmax}, npoints={npoints})");

    let field = FnField::new(2, |s: &DVector<Real>| DVector::from_vec(vec![s[1], -s[0]]));
    let init = DVector::from_vec(vec![1.0, 0.0]);
    let source = SingleTrajectory::new(tmax, npoints, init.clone());

    let mut stats = RunStats::default();
    let koop = Koopman::fit(&field, &source, &KoopmanOptions::default(), &mut stats)?;

    // For a linear system the fitted operator is the one-step rotation.
    let dt = tmax / (npoints - 1) as f64;
    let a = koop.operator();
    println!("Fitted operator:");
    println!("  [{:+.6} {:+.6}]", a[(0, 0)], a[(0, 1)]);
    println!("  [{:+.6} {:+.6}]", a[(1, 0)], a[(1, 1)]);
    println!(
        "Exact one-step rotation: cos(dt)={:+.6}, sin(dt)={:+.6}",
        dt.cos(),
        dt.sin()
    );

    let forecast = koop.forecast(
        &init,
        &ForecastOptions {
            steps,
            ..ForecastOptions::default()
        },
        &mut stats,
    )?;

    let mut max_err: f64 = 0.0;
    for (k, &(x, y)) in forecast.points.iter().enumerate() {
        let t = k as f64 * dt;
        max_err = max_err.max((x - t.cos()).abs().max((y + t.sin()).abs()));
    }
    println!("✓ Forecast max error vs analytic solution: {max_err:.3e}");

    stats.print_summary();
    Ok(())
}

fn build_report(
    koop: &Koopman,
    options: &KoopmanOptions,
    steps_requested: usize,
    forecast: &Forecast,
) -> ForecastReport {
    let diverged_step = match forecast.outcome {
        ForecastOutcome::Diverged { step, .. } => Some(step),
        ForecastOutcome::Completed => None,
    };

    ForecastReport {
        dims: koop.dims(),
        output_dims: koop.output_dims(),
        method: options.method.to_string(),
        steps_requested,
        steps_returned: forecast.points.len().saturating_sub(1),
        diverged: forecast.diverged(),
        diverged_step,
        points: forecast.points.clone(),
    }
}

fn export_csv(path: &Path, forecast: &Forecast) -> Result<(), Box<dyn Error>> {
    let mut csv = String::from("step,x,y\n");
    for (step, &(x, y)) in forecast.points.iter().enumerate() {
        csv.push_str(&format!("{step},{x},{y}\n"));
    }
    std::fs::write(path, csv)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_outcome_fields() {
        let forecast = Forecast {
            points: vec![(1.0, 2.0), (3.0, 4.0)],
            outcome: ForecastOutcome::Diverged {
                step: 1,
                norm: 5.0,
            },
        };

        let report = ForecastReport {
            dims: 2,
            output_dims: 2,
            method: "pseudo-inverse".to_string(),
            steps_requested: 10,
            steps_returned: forecast.points.len() - 1,
            diverged: forecast.diverged(),
            diverged_step: Some(1),
            points: forecast.points.clone(),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"diverged\":true"));
        assert!(json.contains("\"diverged_step\":1"));
    }
}
