//! Shared chart scaffolding: caption, axes, tick labels and grid

use crate::charts::axis::Axis;
use crate::charts::util::font;
use crate::error::VizError;
use crate::spec::{ChartOptions, GridStyle};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::ops::Range;

/// A linear `f64` range whose key points are exactly the resolved ticks
#[derive(Clone)]
pub(crate) struct TickedRange {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedRange {
    pub(crate) fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            inner: RangedCoordf64::from(range),
            ticks,
        }
    }

    fn from_axis(axis: &Axis) -> Self {
        Self::new(axis.range.clone(), axis.ticks.clone())
    }
}

impl Ranged for TickedRange {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

pub(crate) type PlotCoord = Cartesian2d<TickedRange, TickedRange>;

pub(crate) type Plot<'a, DB> = ChartContext<'a, DB, PlotCoord>;

/// Number of dashes along one dashed grid line
const DASHES_PER_LINE: usize = 60;

/// Grid line color
const GRID_COLOR: RGBColor = RGBColor(0xCC, 0xCC, 0xCC);

/// Snap a rotation in degrees to the nearest quarter turn
pub(crate) fn tick_rotation(degrees: u32) -> FontTransform {
    match ((degrees % 360 + 45) / 90) % 4 {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

/// Build the cartesian frame for `x` and `y` and draw axes and grid
pub(crate) fn build_plot<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    options: &ChartOptions,
    x: &Axis,
    y: &Axis,
) -> Result<Plot<'a, DB>, VizError> {
    let rotation = tick_rotation(options.x_tick_rotation);
    let rotated = matches!(rotation, FontTransform::Rotate90 | FontTransform::Rotate270);
    let x_label_area = if rotated { 90 } else { 50 } + label_area(&options.x_label, options.label_font_size);
    let y_label_area = 60 + label_area(&options.y_label, options.label_font_size);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(20)
        .x_label_area_size(x_label_area)
        .y_label_area_size(y_label_area);
    if !options.title.is_empty() {
        builder.caption(&options.title, font(options.label_font_size + 8));
    }

    let mut chart = builder
        .build_cartesian_2d(TickedRange::from_axis(x), TickedRange::from_axis(y))
        .map_err(|e| VizError::RenderingError(format!("Failed to build chart: {e}")))?;

    let x_formatter = |v: &f64| x.label_for(*v);
    let y_formatter = |v: &f64| y.label_for(*v);

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .x_labels(x.ticks.len().max(1))
        .y_labels(y.ticks.len().max(1))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_label_style(font(options.tick_font_size).transform(rotation))
        .y_label_style(font(options.tick_font_size))
        .axis_desc_style(font(options.label_font_size));
    if !options.x_label.is_empty() {
        mesh.x_desc(options.x_label.as_str());
    }
    if !options.y_label.is_empty() {
        mesh.y_desc(options.y_label.as_str());
    }
    mesh.draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to configure mesh: {e}")))?;

    draw_grid(&mut chart, options, x, y)?;
    Ok(chart)
}

fn label_area(label: &str, font_size: u32) -> u32 {
    if label.is_empty() {
        0
    } else {
        font_size + 10
    }
}

/// `[start, end)` pieces of a dashed line from `lo` to `hi`
pub(crate) fn dash_intervals(lo: f64, hi: f64, dashes: usize) -> Vec<(f64, f64)> {
    if dashes == 0 || !(hi > lo) {
        return Vec::new();
    }
    let period = (hi - lo) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let start = lo + period * i as f64;
            (start, start + period * 0.5)
        })
        .collect()
}

fn grid_lines(style: GridStyle, span: &Range<f64>) -> Vec<(f64, f64)> {
    match style {
        GridStyle::Off => Vec::new(),
        GridStyle::Solid => vec![(span.start, span.end)],
        GridStyle::Dashed => dash_intervals(span.start, span.end, DASHES_PER_LINE),
    }
}

fn draw_grid<DB: DrawingBackend>(
    chart: &mut Plot<'_, DB>,
    options: &ChartOptions,
    x: &Axis,
    y: &Axis,
) -> Result<(), VizError> {
    let style = GRID_COLOR.stroke_width(1);

    let vertical = grid_lines(options.x_grid, &y.range);
    let segments = x.ticks.iter().flat_map(|&tx| {
        vertical
            .iter()
            .map(move |&(y0, y1)| PathElement::new(vec![(tx, y0), (tx, y1)], style))
    });
    chart
        .draw_series(segments)
        .map_err(|e| VizError::RenderingError(format!("Failed to draw grid: {e}")))?;

    let horizontal = grid_lines(options.y_grid, &x.range);
    let segments = y.ticks.iter().flat_map(|&ty| {
        horizontal
            .iter()
            .map(move |&(x0, x1)| PathElement::new(vec![(x0, ty), (x1, ty)], style))
    });
    chart
        .draw_series(segments)
        .map_err(|e| VizError::RenderingError(format!("Failed to draw grid: {e}")))?;

    Ok(())
}
