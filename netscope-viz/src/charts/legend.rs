//! Multi-column legend boxes
//!
//! Entries fill the grid row by row. The box is anchored inside the
//! plotting area at one of nine locations.

use crate::charts::marker::draw_marker;
use crate::charts::util::{font, truncate_label};
use crate::error::VizError;
use crate::spec::{ChartOptions, LegendLocation};
use crate::style::Marker;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

const PADDING: i32 = 8;
const HANDLE_WIDTH: i32 = 24;
const HANDLE_GAP: i32 = 6;
const COLUMN_GAP: i32 = 14;
const MAX_LABEL_CHARS: usize = 32;

/// What a legend entry shows next to its label
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendHandle {
    Line { color: RGBColor, width: u32 },
    Marker { color: RGBColor, marker: Marker, size: u32 },
    Bar { color: RGBColor },
}

/// `(column, row)` of each of `entries` legend entries, filled row-major
pub fn legend_slots(entries: usize, columns: usize) -> Vec<(usize, usize)> {
    let columns = columns.max(1);
    (0..entries).map(|i| (i % columns, i / columns)).collect()
}

/// Top-left corner of a `box_size` legend inside `plot`
pub fn legend_origin(location: LegendLocation, plot: (Range<i32>, Range<i32>), box_size: (i32, i32)) -> (i32, i32) {
    let (xs, ys) = plot;
    let (w, h) = box_size;
    let left = xs.start + PADDING;
    let center_x = (xs.start + xs.end - w) / 2;
    let right = xs.end - PADDING - w;
    let top = ys.start + PADDING;
    let center_y = (ys.start + ys.end - h) / 2;
    let bottom = ys.end - PADDING - h;

    match location {
        LegendLocation::UpperLeft => (left, top),
        LegendLocation::UpperCenter => (center_x, top),
        LegendLocation::UpperRight => (right, top),
        LegendLocation::CenterLeft => (left, center_y),
        LegendLocation::Center => (center_x, center_y),
        LegendLocation::CenterRight => (right, center_y),
        LegendLocation::LowerLeft => (left, bottom),
        LegendLocation::LowerCenter => (center_x, bottom),
        LegendLocation::LowerRight => (right, bottom),
    }
}

/// Pair configured legend labels with the handles of the drawn series
///
/// Extra labels are ignored; series without a label get no entry.
pub(crate) fn legend_entries(options: &ChartOptions, handles: &[LegendHandle]) -> Vec<(String, LegendHandle)> {
    options
        .legend
        .iter()
        .flatten()
        .zip(handles)
        .map(|(label, &handle)| (truncate_label(label, MAX_LABEL_CHARS), handle))
        .collect()
}

fn draw_err<E: std::fmt::Display>(e: E) -> VizError {
    VizError::RenderingError(format!("Failed to draw legend: {e}"))
}

/// Draw the legend onto `root`, whose pixels coincide with the backend's
pub(crate) fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: (Range<i32>, Range<i32>),
    options: &ChartOptions,
    entries: &[(String, LegendHandle)],
) -> Result<(), VizError> {
    if entries.is_empty() {
        return Ok(());
    }

    let style = TextStyle::from(font(options.tick_font_size));
    let mut label_width = 0;
    let mut row_height = options.tick_font_size as i32;
    for (label, _) in entries {
        let (w, h) = root.estimate_text_size(label, &style).map_err(draw_err)?;
        label_width = label_width.max(w as i32);
        row_height = row_height.max(h as i32);
    }
    let row_height = row_height + 6;

    let slots = legend_slots(entries.len(), options.legend_columns);
    let columns = options.legend_columns.min(entries.len()) as i32;
    let rows = slots.last().map_or(0, |&(_, row)| row + 1) as i32;
    let cell_width = HANDLE_WIDTH + HANDLE_GAP + label_width;
    let box_size = (
        2 * PADDING + columns * cell_width + (columns - 1) * COLUMN_GAP,
        2 * PADDING + rows * row_height,
    );
    let (x0, y0) = legend_origin(options.legend_location, plot, box_size);

    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + box_size.0, y0 + box_size.1)],
        WHITE.mix(0.85).filled(),
    ))
    .map_err(draw_err)?;
    root.draw(&Rectangle::new(
        [(x0, y0), (x0 + box_size.0, y0 + box_size.1)],
        BLACK.stroke_width(1),
    ))
    .map_err(draw_err)?;

    for ((label, handle), &(column, row)) in entries.iter().zip(&slots) {
        let cx = x0 + PADDING + column as i32 * (cell_width + COLUMN_GAP);
        let cy = y0 + PADDING + row as i32 * row_height + row_height / 2;
        draw_handle(root, (cx, cy), *handle)?;
        root.draw(&Text::new(
            label.clone(),
            (cx + HANDLE_WIDTH + HANDLE_GAP, cy - row_height / 2 + 3),
            style.clone(),
        ))
        .map_err(draw_err)?;
    }
    Ok(())
}

fn draw_handle<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    (x, y): (i32, i32),
    handle: LegendHandle,
) -> Result<(), VizError> {
    match handle {
        LegendHandle::Line { color, width } => root
            .draw(&PathElement::new(
                vec![(x, y), (x + HANDLE_WIDTH, y)],
                color.stroke_width(width),
            ))
            .map_err(draw_err),
        LegendHandle::Marker { color, marker, size } => {
            draw_marker(root, (x + HANDLE_WIDTH / 2, y), marker, size, color)
        }
        LegendHandle::Bar { color } => root
            .draw(&Rectangle::new(
                [(x + 4, y - 6), (x + HANDLE_WIDTH - 4, y + 6)],
                color.filled(),
            ))
            .map_err(draw_err),
    }
}
