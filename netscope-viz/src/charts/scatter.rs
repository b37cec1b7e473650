//! Scatter plots: unconnected markers, one marker shape per series

use crate::charts::axis::{extent, padded, AutoTicks, Axis, AxisSettings};
use crate::charts::frame::build_plot;
use crate::charts::legend::{draw_legend, legend_entries, LegendHandle};
use crate::charts::marker::draw_marker;
use crate::error::VizError;
use crate::spec::ChartSpec;
use crate::style::StyleResolver;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Points of every series; without explicit x values each series is
/// indexed from zero on its own
pub fn scatter_points(dataset: &[Vec<f64>], x_values: Option<&[Vec<f64>]>) -> Vec<Vec<(f64, f64)>> {
    dataset
        .iter()
        .enumerate()
        .map(|(i, ys)| match x_values.and_then(|xs| xs.get(i)) {
            Some(xs) => xs.iter().copied().zip(ys.iter().copied()).collect(),
            None => ys.iter().enumerate().map(|(k, &y)| (k as f64, y)).collect(),
        })
        .collect()
}

pub(crate) fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), VizError> {
    let options = spec.options();
    let series = scatter_points(spec.dataset(), options.x_values.as_deref());

    let x_settings = AxisSettings::x(options);
    let y_settings = AxisSettings::y(options);
    let x_extent = extent(x_settings.scale, series.iter().flatten().map(|&(x, _)| x));
    let y_extent = extent(y_settings.scale, series.iter().flatten().map(|&(_, y)| y));
    let x = Axis::resolve(x_settings, padded(x_extent, 0.05), AutoTicks::Nice)?;
    let y = Axis::resolve(y_settings, padded(y_extent, 0.05), AutoTicks::Nice)?;

    let styles = StyleResolver::new(options.palette);
    let chart = build_plot(root, options, &x, &y)?;
    let (px, py) = chart.plotting_area().get_pixel_range();

    let mut handles = Vec::with_capacity(series.len());
    for (i, points) in series.iter().enumerate() {
        let style = styles.style_for(i);
        handles.push(LegendHandle::Marker {
            color: style.color,
            marker: style.marker,
            size: options.marker_size,
        });

        for &(sx, sy) in points {
            let (Some(sx), Some(sy)) = (x.scale.project(sx), y.scale.project(sy)) else {
                continue;
            };
            if x.clamp(sx) != sx || y.clamp(sy) != sy {
                continue;
            }
            draw_marker(root, chart.backend_coord(&(sx, sy)), style.marker, options.marker_size, style.color)?;
        }
    }

    let entries = legend_entries(options, &handles);
    draw_legend(root, (px, py), options, &entries)
}
