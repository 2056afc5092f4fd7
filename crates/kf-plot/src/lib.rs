//! Diagnostic phase-portrait rendering.
//!
//! Renders the true sampled trajectory against the linear-model forecast,
//! projected onto the two reporting coordinates, as a PNG. Purely
//! diagnostic; the only contract on the output is "a viewable image file".

pub mod error;

pub use error::{PlotError, PlotResult};

use kf_core::Real;
use plotters::prelude::*;
use std::path::Path;

/// Axis ranges covering every point of both series, padded by 5% per side.
///
/// Returns `None` when both series are empty.
pub fn series_bounds(
    sim: &[(Real, Real)],
    approx: &[(Real, Real)],
) -> Option<((Real, Real), (Real, Real))> {
    let mut points = sim.iter().chain(approx.iter());
    let &(x0, y0) = points.next()?;

    let (mut xmin, mut xmax, mut ymin, mut ymax) = (x0, x0, y0, y0);
    for &(x, y) in points {
        xmin = xmin.min(x);
        xmax = xmax.max(x);
        ymin = ymin.min(y);
        ymax = ymax.max(y);
    }

    // Degenerate ranges still need nonzero extent to build a chart.
    let xpad = (0.05 * (xmax - xmin)).max(1e-3);
    let ypad = (0.05 * (ymax - ymin)).max(1e-3);

    Some((
        (xmin - xpad, xmax + xpad),
        (ymin - ypad, ymax + ypad),
    ))
}

/// Render the true vs approximated phase portrait to `path`.
///
/// `sim` is drawn as red crosses, `approx` as a black line, matching the
/// conventional styling for measured-vs-model comparisons.
pub fn plot_phase_portrait(
    path: &Path,
    sim: &[(Real, Real)],
    approx: &[(Real, Real)],
    caption: &str,
) -> PlotResult<()> {
    let ((xmin, xmax), (ymin, ymax)) =
        series_bounds(sim, approx).ok_or(PlotError::EmptySeries)?;

    let root = BitMapBackend::new(path, (720, 560)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::Backend {
            message: format!("backend error: {e}"),
        })?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(caption, ("sans-serif", 24.0))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)
        .map_err(|e| PlotError::Backend {
            message: format!("chart build error: {e}"),
        })?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .draw()
        .map_err(|e| PlotError::Backend {
            message: format!("mesh error: {e}"),
        })?;

    chart
        .draw_series(
            sim.iter()
                .map(|&(x, y)| Cross::new((x, y), 4, RED.stroke_width(1))),
        )
        .map_err(|e| PlotError::Backend {
            message: format!("draw error: {e}"),
        })?
        .label("Simulation Data")
        .legend(|(x, y)| Cross::new((x, y), 4, RED.stroke_width(1)));

    chart
        .draw_series(LineSeries::new(approx.iter().copied(), &BLACK))
        .map_err(|e| PlotError::Backend {
            message: format!("draw error: {e}"),
        })?
        .label("eDMD Approx")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], &BLACK));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| PlotError::Backend {
            message: format!("legend error: {e}"),
        })?;

    root.present().map_err(|e| PlotError::Backend {
        message: format!("render error: {e}"),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_both_series_with_padding() {
        let sim = [(0.0, 0.0), (1.0, 2.0)];
        let approx = [(-1.0, 0.5)];
        let ((xmin, xmax), (ymin, ymax)) = series_bounds(&sim, &approx).unwrap();

        assert!(xmin < -1.0 && xmax > 1.0);
        assert!(ymin < 0.0 && ymax > 2.0);
    }

    #[test]
    fn bounds_of_single_point_are_nonempty() {
        let ((xmin, xmax), (ymin, ymax)) = series_bounds(&[(2.0, 3.0)], &[]).unwrap();
        assert!(xmin < 2.0 && xmax > 2.0);
        assert!(ymin < 3.0 && ymax > 3.0);
    }

    #[test]
    fn bounds_of_empty_input_are_none() {
        assert!(series_bounds(&[], &[]).is_none());
    }
}
