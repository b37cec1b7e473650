//! Hatch fills for bars
//!
//! The drawing backend has no pattern fills, so hatches are expanded into
//! straight segments clipped to the bar rectangle, in pixel space.

use crate::style::Hatch;

pub type Pixel = (i32, i32);

/// Axis-aligned pixel rectangle, `x0 <= x1` and `y0 <= y1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn from_corners(a: Pixel, b: Pixel) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let rect = PixelRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (rect.x0 < rect.x1 && rect.y0 < rect.y1).then_some(rect)
    }

    pub fn contains(&self, p: Pixel) -> bool {
        (self.x0..=self.x1).contains(&p.0) && (self.y0..=self.y1).contains(&p.1)
    }
}

/// Segments filling `rect` with `pattern`, lines `spacing` pixels apart
pub fn hatch_segments(rect: PixelRect, pattern: Hatch, spacing: i32) -> Vec<(Pixel, Pixel)> {
    let spacing = spacing.max(2);
    let mut segments = Vec::new();
    match pattern {
        Hatch::Vertical => vertical(rect, spacing, &mut segments),
        Hatch::Horizontal => horizontal(rect, spacing, &mut segments),
        Hatch::Grid => {
            vertical(rect, spacing, &mut segments);
            horizontal(rect, spacing, &mut segments);
        }
        Hatch::Slash => rising(rect, spacing, &mut segments),
        Hatch::Backslash => falling(rect, spacing, &mut segments),
        Hatch::DiagonalCross => {
            rising(rect, spacing, &mut segments);
            falling(rect, spacing, &mut segments);
        }
    }
    segments
}

fn vertical(r: PixelRect, spacing: i32, out: &mut Vec<(Pixel, Pixel)>) {
    let mut x = r.x0 + spacing;
    while x < r.x1 {
        out.push(((x, r.y0), (x, r.y1)));
        x += spacing;
    }
}

fn horizontal(r: PixelRect, spacing: i32, out: &mut Vec<(Pixel, Pixel)>) {
    let mut y = r.y0 + spacing;
    while y < r.y1 {
        out.push(((r.x0, y), (r.x1, y)));
        y += spacing;
    }
}

// `/` in screen space, where y grows downward: lines x + y = c
fn rising(r: PixelRect, spacing: i32, out: &mut Vec<(Pixel, Pixel)>) {
    let mut c = r.x0 + r.y0 + spacing;
    while c < r.x1 + r.y1 {
        let xa = r.x0.max(c - r.y1);
        let xb = r.x1.min(c - r.y0);
        if xa < xb {
            out.push(((xa, c - xa), (xb, c - xb)));
        }
        c += spacing;
    }
}

// `\`: lines x - y = c
fn falling(r: PixelRect, spacing: i32, out: &mut Vec<(Pixel, Pixel)>) {
    let mut c = r.x0 - r.y1 + spacing;
    while c < r.x1 - r.y0 {
        let xa = r.x0.max(c + r.y0);
        let xb = r.x1.min(c + r.y1);
        if xa < xb {
            out.push(((xa, xa - c), (xb, xb - c)));
        }
        c += spacing;
    }
}
