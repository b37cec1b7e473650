//! Cyclic series styling
//!
//! Series `i` always gets the same color, marker, hatch and line style for a
//! given palette: every attribute list is indexed modulo its length.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PASTEL: [RGBColor; 10] = [
    RGBColor(0xA1, 0xC9, 0xF4),
    RGBColor(0xFF, 0xB4, 0x82),
    RGBColor(0x8D, 0xE5, 0xA1),
    RGBColor(0xFF, 0x9F, 0x9B),
    RGBColor(0xD0, 0xBB, 0xFF),
    RGBColor(0xDE, 0xBB, 0x9B),
    RGBColor(0xFA, 0xB0, 0xE4),
    RGBColor(0xCF, 0xCF, 0xCF),
    RGBColor(0xFF, 0xFE, 0xA3),
    RGBColor(0xB9, 0xF2, 0xF0),
];

const MUTED: [RGBColor; 10] = [
    RGBColor(0x48, 0x78, 0xD0),
    RGBColor(0xEE, 0x85, 0x4A),
    RGBColor(0x6A, 0xCC, 0x64),
    RGBColor(0xD6, 0x5F, 0x5F),
    RGBColor(0x95, 0x6C, 0xB4),
    RGBColor(0x8C, 0x61, 0x3C),
    RGBColor(0xDC, 0x7E, 0xC0),
    RGBColor(0x79, 0x79, 0x79),
    RGBColor(0xD5, 0xBB, 0x67),
    RGBColor(0x82, 0xC6, 0xE2),
];

const DEEP: [RGBColor; 10] = [
    RGBColor(0x4C, 0x72, 0xB0),
    RGBColor(0xDD, 0x84, 0x52),
    RGBColor(0x55, 0xA8, 0x68),
    RGBColor(0xC4, 0x4E, 0x52),
    RGBColor(0x81, 0x72, 0xB3),
    RGBColor(0x93, 0x78, 0x60),
    RGBColor(0xDA, 0x8B, 0xC3),
    RGBColor(0x8C, 0x8C, 0x8C),
    RGBColor(0xCC, 0xB9, 0x74),
    RGBColor(0x64, 0xB5, 0xCD),
];

const BRIGHT: [RGBColor; 10] = [
    RGBColor(0x02, 0x3E, 0xFF),
    RGBColor(0xFF, 0x7C, 0x00),
    RGBColor(0x1A, 0xC9, 0x38),
    RGBColor(0xE8, 0x00, 0x0B),
    RGBColor(0x8B, 0x2B, 0xE2),
    RGBColor(0x9F, 0x48, 0x00),
    RGBColor(0xF1, 0x4C, 0xC1),
    RGBColor(0xA3, 0xA3, 0xA3),
    RGBColor(0xFF, 0xC4, 0x00),
    RGBColor(0x00, 0xD7, 0xFF),
];

const COLORBLIND: [RGBColor; 10] = [
    RGBColor(0x01, 0x73, 0xB2),
    RGBColor(0xDE, 0x8F, 0x05),
    RGBColor(0x02, 0x9E, 0x73),
    RGBColor(0xD5, 0x5E, 0x00),
    RGBColor(0xCC, 0x78, 0xBC),
    RGBColor(0xCA, 0x91, 0x61),
    RGBColor(0xFB, 0xAF, 0xE4),
    RGBColor(0x94, 0x94, 0x94),
    RGBColor(0xEC, 0xE1, 0x33),
    RGBColor(0x56, 0xB4, 0xE9),
];

const DARK: [RGBColor; 10] = [
    RGBColor(0x00, 0x1C, 0x7F),
    RGBColor(0xB1, 0x40, 0x0D),
    RGBColor(0x12, 0x71, 0x1C),
    RGBColor(0x8C, 0x08, 0x00),
    RGBColor(0x59, 0x1E, 0x71),
    RGBColor(0x59, 0x2F, 0x0D),
    RGBColor(0xA2, 0x35, 0x82),
    RGBColor(0x3C, 0x3C, 0x3C),
    RGBColor(0xB8, 0x85, 0x0A),
    RGBColor(0x00, 0x63, 0x74),
];

/// The six built-in 10-color palettes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteName {
    Pastel,
    Muted,
    #[default]
    Deep,
    Bright,
    Colorblind,
    Dark,
}

impl PaletteName {
    pub const ALL: [PaletteName; 6] = [
        PaletteName::Pastel,
        PaletteName::Muted,
        PaletteName::Deep,
        PaletteName::Bright,
        PaletteName::Colorblind,
        PaletteName::Dark,
    ];

    pub fn colors(&self) -> &'static [RGBColor; 10] {
        match self {
            PaletteName::Pastel => &PASTEL,
            PaletteName::Muted => &MUTED,
            PaletteName::Deep => &DEEP,
            PaletteName::Bright => &BRIGHT,
            PaletteName::Colorblind => &COLORBLIND,
            PaletteName::Dark => &DARK,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteName::Pastel => "pastel",
            PaletteName::Muted => "muted",
            PaletteName::Deep => "deep",
            PaletteName::Bright => "bright",
            PaletteName::Colorblind => "colorblind",
            PaletteName::Dark => "dark",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        PaletteName::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| format!("unknown palette {s:?}"))
    }
}

/// Point marker shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
    Square,
    Diamond,
    Cross,
    Plus,
}

/// Bar fill patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hatch {
    /// `/`
    Slash,
    /// `\`
    Backslash,
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `+`
    Grid,
    /// `x`
    DiagonalCross,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

pub const MARKERS: [Marker; 6] = [
    Marker::Circle,
    Marker::Triangle,
    Marker::Square,
    Marker::Diamond,
    Marker::Cross,
    Marker::Plus,
];

pub const HATCHES: [Hatch; 6] = [
    Hatch::Slash,
    Hatch::Backslash,
    Hatch::Vertical,
    Hatch::Horizontal,
    Hatch::Grid,
    Hatch::DiagonalCross,
];

/// Visual parameters of one series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
    pub hatch: Hatch,
    pub line_style: LineStyle,
}

/// Pure, index-based style lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleResolver {
    palette: PaletteName,
}

impl StyleResolver {
    pub fn new(palette: PaletteName) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> PaletteName {
        self.palette
    }

    pub fn color(&self, index: usize) -> RGBColor {
        let colors = self.palette.colors();
        colors[index % colors.len()]
    }

    pub fn marker(&self, index: usize) -> Marker {
        MARKERS[index % MARKERS.len()]
    }

    pub fn hatch(&self, index: usize) -> Hatch {
        HATCHES[index % HATCHES.len()]
    }

    pub fn style_for(&self, index: usize) -> SeriesStyle {
        SeriesStyle {
            color: self.color(index),
            marker: self.marker(index),
            hatch: self.hatch(index),
            line_style: LineStyle::Solid,
        }
    }
}
