//! Grayscale heatmaps of square matrices, with a colorbar
//!
//! Intensities are normalized to the global minimum and maximum of the
//! matrix: the minimum renders black, the maximum white. Row 0 is drawn at
//! the top.

use crate::charts::axis::{AutoTicks, Axis, AxisSettings};
use crate::charts::frame::build_plot;
use crate::charts::util::{font, format_tick};
use crate::error::VizError;
use crate::spec::ChartSpec;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Width of the colorbar panel in pixels
const COLORBAR_WIDTH: i32 = 120;

/// Gradient steps in the colorbar
const COLORBAR_STEPS: usize = 64;

/// Global `(min, max)` over every finite cell
pub fn value_range(matrix: &[Vec<f64>]) -> Option<(f64, f64)> {
    matrix
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Per-cell intensity in `[0, 1]`; a constant matrix maps to all zeros
pub fn heatmap_cells(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let (lo, hi) = value_range(matrix).unwrap_or((0.0, 0.0));
    let span = hi - lo;
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    if span > 0.0 && v.is_finite() {
                        ((v - lo) / span).clamp(0.0, 1.0)
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Grayscale color for an intensity: 0 is black, 1 is white
pub fn gray(intensity: f64) -> RGBColor {
    let level = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(level, level, level)
}

pub(crate) fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), VizError> {
    let options = spec.options();
    let matrix = spec.dataset();
    let n = matrix.len();
    let size = n as f64;

    let (main, colorbar) = root.split_horizontally(options.width as i32 - COLORBAR_WIDTH);

    // Ticks sit on cell centers, labeled by row and column index
    let centers: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
    let rows: Vec<f64> = (0..n).map(|r| size - r as f64 - 0.5).collect();
    let indices: Vec<String> = (0..n).map(|i| i.to_string()).collect();

    let mut x_settings = AxisSettings::x(options).linear();
    if x_settings.ticks.is_none() {
        x_settings.ticks = Some(centers.as_slice());
        x_settings.tick_labels = Some(indices.as_slice());
    }
    let mut y_settings = AxisSettings::y(options).linear();
    if y_settings.ticks.is_none() {
        y_settings.ticks = Some(rows.as_slice());
        y_settings.tick_labels = Some(indices.as_slice());
    }
    let x = Axis::resolve(x_settings, Some((0.0, size)), AutoTicks::Integers)?;
    let y = Axis::resolve(y_settings, Some((0.0, size)), AutoTicks::Integers)?;

    let mut chart = build_plot(&main, options, &x, &y)?;
    let cells = heatmap_cells(matrix);
    let rects = cells.iter().enumerate().flat_map(|(r, row)| {
        row.iter().enumerate().map(move |(c, &intensity)| {
            let top = size - r as f64;
            Rectangle::new(
                [(c as f64, top - 1.0), (c as f64 + 1.0, top)],
                gray(intensity).filled(),
            )
        })
    });
    chart
        .draw_series(rects)
        .map_err(|e| VizError::RenderingError(format!("Failed to draw heatmap cells: {e}")))?;

    let (lo, hi) = value_range(matrix).unwrap_or((0.0, 0.0));
    draw_colorbar(&colorbar, options.tick_font_size, lo, hi)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    tick_font_size: u32,
    lo: f64,
    hi: f64,
) -> Result<(), VizError> {
    let hi = if hi > lo { hi } else { lo + 1.0 };
    let mut bar = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(|e| VizError::RenderingError(format!("Failed to build colorbar: {e}")))?;

    let formatter = |v: &f64| format_tick(*v);
    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&formatter)
        .y_label_style(font(tick_font_size))
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to draw colorbar axis: {e}")))?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    let strips = (0..COLORBAR_STEPS).map(|k| {
        let y0 = lo + step * k as f64;
        let intensity = (k as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], gray(intensity).filled())
    });
    bar.draw_series(strips)
        .map_err(|e| VizError::RenderingError(format!("Failed to draw colorbar: {e}")))?;
    Ok(())
}
