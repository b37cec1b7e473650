//! Grouped and stacked bar charts
//!
//! Grouped: with `L` series, bar `j` of series `i` is centered at
//! `j - h*(L-1) + 2*h*i` and is `2*h = bar_width / L` wide.
//!
//! Stacked: every layer shares one bar position per value; positions are
//! clustered `group_size` at a time, and each layer sits on the running sum
//! of the layers below it.

use crate::charts::axis::{extent, padded, AutoTicks, Axis, AxisSettings};
use crate::charts::frame::build_plot;
use crate::charts::hatch::{hatch_segments, PixelRect};
use crate::charts::legend::{draw_legend, legend_entries, LegendHandle};
use crate::error::VizError;
use crate::spec::{AxisScale, ChartSpec};
use crate::style::StyleResolver;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Pixel distance between hatch lines
const HATCH_SPACING: i32 = 8;

/// One bar in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x_center: f64,
    pub width: f64,
    pub bottom: f64,
    pub top: f64,
    /// Index of the series (or stacked layer) the bar belongs to
    pub series: usize,
}

impl Bar {
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Side-by-side bars, one group per value index
pub fn grouped_bars(dataset: &[Vec<f64>], bar_width: f64) -> Vec<Bar> {
    let labels = dataset.len().max(1) as f64;
    let half = bar_width / (2.0 * labels);
    dataset
        .iter()
        .enumerate()
        .flat_map(|(i, values)| {
            values.iter().enumerate().map(move |(j, &v)| Bar {
                x_center: j as f64 - half * (labels - 1.0) + 2.0 * half * i as f64,
                width: 2.0 * half,
                bottom: 0.0,
                top: v,
                series: i,
            })
        })
        .collect()
}

/// Layered bars in clusters of `group_size` adjacent positions
///
/// Layers must have equal length divisible by `group_size`;
/// [`ChartSpec::new`] rejects anything else.
pub fn stacked_bars(layers: &[Vec<f64>], bar_width: f64, group_size: usize) -> Vec<Bar> {
    let group = group_size.max(1);
    let positions = layers.first().map_or(0, Vec::len);
    let half = bar_width / (2.0 * group as f64);
    let centers: Vec<f64> = (0..positions)
        .map(|j| {
            let cluster = (j / group) as f64;
            let slot = (j % group) as f64;
            cluster - half * (group as f64 - 1.0) + 2.0 * half * slot
        })
        .collect();

    let mut bottom = vec![0.0; positions];
    let mut bars = Vec::with_capacity(positions * layers.len());
    for (k, layer) in layers.iter().enumerate() {
        for (j, &v) in layer.iter().enumerate().take(positions) {
            bars.push(Bar {
                x_center: centers[j],
                width: 2.0 * half,
                bottom: bottom[j],
                top: bottom[j] + v,
                series: k,
            });
            bottom[j] += v;
        }
    }
    bars
}

/// Value axis extent: covers zero and every bar, padded above the tallest
fn value_extent(bars: &[Bar], scale: AxisScale) -> Option<(f64, f64)> {
    let values = bars.iter().flat_map(|b| [b.bottom, b.top]);
    let (lo, hi) = extent(scale, values)?;
    if (hi - lo).abs() < f64::EPSILON {
        return padded(Some((lo, hi)), 0.0);
    }
    let span = (hi - lo).max(f64::EPSILON);
    match scale {
        AxisScale::Linear => Some((if lo < 0.0 { lo - span * 0.05 } else { lo }, hi + span * 0.05)),
        AxisScale::Log => Some((lo - span * 0.05, hi + span * 0.05)),
    }
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    bars: &[Bar],
    positions: usize,
) -> Result<(), VizError> {
    let options = spec.options();
    let x_settings = AxisSettings::x(options).linear();
    let y_settings = AxisSettings::y(options);
    let x = Axis::resolve(
        x_settings,
        Some((-0.5, positions.max(1) as f64 - 0.5)),
        AutoTicks::Integers,
    )?;
    let y = Axis::resolve(y_settings, value_extent(bars, y_settings.scale), AutoTicks::Nice)?;

    let styles = StyleResolver::new(options.palette);
    let mut chart = build_plot(root, options, &x, &y)?;
    let (px, py) = chart.plotting_area().get_pixel_range();
    let plot_rect = PixelRect::from_corners((px.start, py.start), (px.end, py.end));
    let hatch_style = BLACK.mix(0.45).stroke_width(1);

    for bar in bars {
        let style = styles.style_for(bar.series);
        let x0 = x.clamp(bar.x_center - bar.width / 2.0);
        let x1 = x.clamp(bar.x_center + bar.width / 2.0);
        let y0 = y.clamp(y.scale.project(bar.bottom).unwrap_or(y.range.start));
        let y1 = y.clamp(y.scale.project(bar.top).unwrap_or(y.range.start));
        if x0 == x1 || y0 == y1 {
            continue;
        }

        chart
            .draw_series(std::iter::once(Rectangle::new([(x0, y0), (x1, y1)], style.color.filled())))
            .map_err(|e| VizError::RenderingError(format!("Failed to draw bar: {e}")))?;

        if options.hatch_bars {
            let rect = PixelRect::from_corners(chart.backend_coord(&(x0, y0)), chart.backend_coord(&(x1, y1)));
            let Some(rect) = rect.intersect(&plot_rect) else {
                continue;
            };
            for (a, b) in hatch_segments(rect, style.hatch, HATCH_SPACING) {
                root.draw(&PathElement::new(vec![a, b], hatch_style))
                    .map_err(|e| VizError::RenderingError(format!("Failed to draw hatch: {e}")))?;
            }
        }
    }

    let series = bars.iter().map(|b| b.series + 1).max().unwrap_or(0);
    let handles: Vec<LegendHandle> = (0..series)
        .map(|i| LegendHandle::Bar {
            color: styles.color(i),
        })
        .collect();
    let entries = legend_entries(options, &handles);
    draw_legend(root, (px, py), options, &entries)
}

pub(crate) fn draw_grouped<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), VizError> {
    let options = spec.options();
    let bars = grouped_bars(spec.dataset(), options.bar_width);
    let positions = spec.dataset().iter().map(Vec::len).max().unwrap_or(0);
    draw_bars(root, spec, &bars, positions)
}

pub(crate) fn draw_stacked<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), VizError> {
    let options = spec.options();
    let bars = stacked_bars(spec.dataset(), options.bar_width, options.group_size);
    let clusters = spec.dataset().first().map_or(0, Vec::len) / options.group_size.max(1);
    draw_bars(root, spec, &bars, clusters)
}
