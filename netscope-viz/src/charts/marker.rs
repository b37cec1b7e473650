//! Marker glyphs, drawn in pixel space

use crate::error::VizError;
use crate::style::Marker;
use plotters::coord::Shift;
use plotters::prelude::*;

fn draw_err<E: std::fmt::Display>(e: E) -> VizError {
    VizError::RenderingError(format!("Failed to draw marker: {e}"))
}

/// Draw one marker centered on pixel `(x, y)` with half-size `size`
pub(crate) fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (x, y): (i32, i32),
    marker: Marker,
    size: u32,
    color: RGBColor,
) -> Result<(), VizError> {
    let s = size as i32;
    let fill = color.filled();
    let stroke = color.stroke_width(2);
    match marker {
        Marker::Circle => area.draw(&Circle::new((x, y), size, fill)),
        Marker::Triangle => area.draw(&TriangleMarker::new((x, y), size, fill)),
        Marker::Square => area.draw(&Rectangle::new([(x - s, y - s), (x + s, y + s)], fill)),
        Marker::Diamond => area.draw(&Polygon::new(
            vec![(x, y - s), (x + s, y), (x, y + s), (x - s, y)],
            fill,
        )),
        Marker::Cross => area.draw(&Cross::new((x, y), size, stroke)),
        Marker::Plus => area
            .draw(&PathElement::new(vec![(x - s, y), (x + s, y)], stroke))
            .and_then(|_| area.draw(&PathElement::new(vec![(x, y - s), (x, y + s)], stroke))),
    }
    .map_err(draw_err)
}
