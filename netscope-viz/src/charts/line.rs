//! Line charts
//!
//! Series `i` is drawn as a polyline through `(x[i][k], dataset[i][k])`.
//! Without explicit x values every series shares the synthesized index
//! `0..len(dataset[0])`; [`ChartSpec::new`] rejects any longer series.

use crate::charts::axis::{extent, padded, AutoTicks, Axis, AxisSettings};
use crate::charts::frame::build_plot;
use crate::charts::legend::{draw_legend, legend_entries, LegendHandle};
use crate::charts::marker::draw_marker;
use crate::error::VizError;
use crate::spec::ChartSpec;
use crate::style::StyleResolver;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Pair every series with its x values
pub fn series_points(dataset: &[Vec<f64>], x_values: Option<&[Vec<f64>]>) -> Vec<Vec<(f64, f64)>> {
    match x_values {
        Some(xs) => dataset
            .iter()
            .zip(xs)
            .map(|(ys, xs)| xs.iter().copied().zip(ys.iter().copied()).collect())
            .collect(),
        None => dataset
            .iter()
            .map(|ys| ys.iter().enumerate().map(|(k, &y)| (k as f64, y)).collect())
            .collect(),
    }
}

/// Draw `series` as styled polylines, with an optional legend
///
/// Shared by line and CDF charts; `x` and `y` must already be resolved
/// against the same points.
pub(crate) fn draw_polylines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    series: &[Vec<(f64, f64)>],
    x: &Axis,
    y: &Axis,
) -> Result<(), VizError> {
    let options = spec.options();
    let styles = StyleResolver::new(options.palette);
    let mut chart = build_plot(root, options, x, y)?;

    let mut handles = Vec::with_capacity(series.len());
    for (i, points) in series.iter().enumerate() {
        let style = styles.style_for(i);
        handles.push(LegendHandle::Line {
            color: style.color,
            width: options.line_width,
        });

        let projected: Vec<(f64, f64)> = points
            .iter()
            .filter_map(|&(px, py)| Some((x.scale.project(px)?, y.scale.project(py)?)))
            .collect();
        if projected.is_empty() {
            continue;
        }

        chart
            .draw_series(LineSeries::new(
                projected.iter().copied(),
                style.color.stroke_width(options.line_width),
            ))
            .map_err(|e| VizError::RenderingError(format!("Failed to draw series {i}: {e}")))?;

        if options.show_markers {
            for point in &projected {
                draw_marker(root, chart.backend_coord(point), style.marker, options.marker_size, style.color)?;
            }
        }
    }

    let entries = legend_entries(options, &handles);
    draw_legend(root, chart.plotting_area().get_pixel_range(), options, &entries)
}

pub(crate) fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), VizError> {
    let options = spec.options();
    let series = series_points(spec.dataset(), options.x_values.as_deref());

    let x_settings = AxisSettings::x(options);
    let y_settings = AxisSettings::y(options);
    let x_extent = extent(x_settings.scale, series.iter().flatten().map(|&(x, _)| x));
    let y_extent = extent(y_settings.scale, series.iter().flatten().map(|&(_, y)| y));
    let x = Axis::resolve(x_settings, padded(x_extent, 0.0), AutoTicks::Nice)?;
    let y = Axis::resolve(y_settings, padded(y_extent, 0.05), AutoTicks::Nice)?;

    draw_polylines(root, spec, &series, &x, &y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_x_follows_first_series() {
        let dataset = vec![vec![5.0, 6.0, 7.0], vec![1.0], vec![]];
        let series = series_points(&dataset, None);
        assert_eq!(series[0], vec![(0.0, 5.0), (1.0, 6.0), (2.0, 7.0)]);
        assert_eq!(series[1], vec![(0.0, 1.0)]);
        assert!(series[2].is_empty());
    }

    #[test]
    fn explicit_x_values_are_paired() {
        let dataset = vec![vec![10.0, 20.0]];
        let xs = vec![vec![-1.5, 4.0]];
        assert_eq!(series_points(&dataset, Some(xs.as_slice())), vec![vec![(-1.5, 10.0), (4.0, 20.0)]]);
    }
}
