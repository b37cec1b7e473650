//! Declarative chart requests
//!
//! A [`ChartSpec`] bundles a chart type, its dataset and every rendering
//! option. Shape requirements are checked once, in [`ChartSpec::new`], so the
//! renderer can assume a well-formed request.

use crate::error::VizError;
use crate::style::PaletteName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Histogram,
    StackedHistogram,
    Line,
    Cdf,
    Scatter,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Histogram,
        ChartKind::StackedHistogram,
        ChartKind::Line,
        ChartKind::Cdf,
        ChartKind::Scatter,
        ChartKind::Heatmap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::StackedHistogram => "stacked-histogram",
            ChartKind::Line => "line",
            ChartKind::Cdf => "cdf",
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| VizError::UnknownChartType(s.to_string()))
    }
}

/// Coordinate transform of one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

/// Background grid lines for one axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    Off,
    Solid,
    #[default]
    Dashed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendLocation {
    UpperLeft,
    UpperCenter,
    #[default]
    UpperRight,
    CenterLeft,
    Center,
    CenterRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

/// Every recognized rendering option, with immutable defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub title: String,
    /// Explicit x values, one sequence per series
    pub x_values: Option<Vec<Vec<f64>>>,
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub marker_size: u32,
    /// Draw markers on line chart vertices
    pub show_markers: bool,
    pub x_label: String,
    pub y_label: String,
    pub label_font_size: u32,
    pub tick_font_size: u32,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    pub x_ticks: Option<Vec<f64>>,
    pub y_ticks: Option<Vec<f64>>,
    pub x_tick_labels: Option<Vec<String>>,
    pub y_tick_labels: Option<Vec<String>>,
    /// Degrees; snapped to a multiple of 90
    pub x_tick_rotation: u32,
    pub legend: Option<Vec<String>>,
    pub legend_location: LegendLocation,
    pub legend_columns: usize,
    pub x_grid: GridStyle,
    pub y_grid: GridStyle,
    /// Total bar width available at each bar position
    pub bar_width: f64,
    /// Adjacent bars per cluster in stacked histograms
    pub group_size: usize,
    pub hatch_bars: bool,
    pub palette: PaletteName,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_values: None,
            width: 1024,
            height: 768,
            line_width: 2,
            marker_size: 4,
            show_markers: false,
            x_label: String::new(),
            y_label: String::new(),
            label_font_size: 20,
            tick_font_size: 14,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            x_limits: None,
            y_limits: None,
            x_ticks: None,
            y_ticks: None,
            x_tick_labels: None,
            y_tick_labels: None,
            x_tick_rotation: 0,
            legend: None,
            legend_location: LegendLocation::UpperRight,
            legend_columns: 1,
            x_grid: GridStyle::Dashed,
            y_grid: GridStyle::Dashed,
            bar_width: 0.8,
            group_size: 1,
            hatch_bars: true,
            palette: PaletteName::Deep,
        }
    }
}

impl ChartOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn x_values(mut self, x_values: Vec<Vec<f64>>) -> Self {
        self.x_values = Some(x_values);
        self
    }

    pub fn legend(mut self, entries: Vec<String>) -> Self {
        self.legend = Some(entries);
        self
    }

    pub fn group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }
}

/// A validated rendering request
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    kind: ChartKind,
    dataset: Vec<Vec<f64>>,
    options: ChartOptions,
}

impl ChartSpec {
    /// Validate `dataset` and `options` against the requirements of `kind`
    ///
    /// For Heatmap the dataset is the rows of a square matrix; for every
    /// other kind it is one value sequence per series.
    pub fn new(kind: ChartKind, dataset: Vec<Vec<f64>>, options: ChartOptions) -> Result<Self, VizError> {
        validate_options(&options)?;
        validate_dataset(kind, &dataset, &options)?;
        Ok(Self {
            kind,
            dataset,
            options,
        })
    }

    /// Build a spec from `(x, y)` series, moving x into `options.x_values`
    pub fn from_points(
        kind: ChartKind,
        series: &[Vec<(f64, f64)>],
        options: ChartOptions,
    ) -> Result<Self, VizError> {
        let x_values = series
            .iter()
            .map(|s| s.iter().map(|&(x, _)| x).collect())
            .collect();
        let dataset = series
            .iter()
            .map(|s| s.iter().map(|&(_, y)| y).collect())
            .collect();
        Self::new(kind, dataset, options.x_values(x_values))
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn dataset(&self) -> &[Vec<f64>] {
        &self.dataset
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }
}

fn shape_error(msg: impl Into<String>) -> VizError {
    VizError::InvalidDatasetShape(msg.into())
}

fn validate_options(options: &ChartOptions) -> Result<(), VizError> {
    if options.width == 0 || options.height == 0 {
        return Err(VizError::InvalidConfiguration(format!(
            "figure size must be non-zero, got {}x{}",
            options.width, options.height
        )));
    }
    if options.legend_columns == 0 {
        return Err(VizError::InvalidConfiguration(
            "legend_columns must be at least 1".to_string(),
        ));
    }
    if !(options.bar_width.is_finite() && options.bar_width > 0.0) {
        return Err(VizError::InvalidConfiguration(format!(
            "bar_width must be positive, got {}",
            options.bar_width
        )));
    }
    if options.group_size == 0 {
        return Err(VizError::InvalidConfiguration(
            "group_size must be at least 1".to_string(),
        ));
    }
    for (axis, limits) in [("x", options.x_limits), ("y", options.y_limits)] {
        if let Some((lo, hi)) = limits {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(VizError::InvalidConfiguration(format!(
                    "{axis} limits must be finite with lo < hi, got ({lo}, {hi})"
                )));
            }
        }
    }
    for (axis, ticks, labels) in [
        ("x", &options.x_ticks, &options.x_tick_labels),
        ("y", &options.y_ticks, &options.y_tick_labels),
    ] {
        if let (Some(ticks), Some(labels)) = (ticks, labels) {
            if ticks.len() != labels.len() {
                return Err(VizError::InvalidConfiguration(format!(
                    "{axis} has {} ticks but {} tick labels",
                    ticks.len(),
                    labels.len()
                )));
            }
        }
    }
    Ok(())
}

fn validate_dataset(kind: ChartKind, dataset: &[Vec<f64>], options: &ChartOptions) -> Result<(), VizError> {
    if dataset.is_empty() {
        return Err(shape_error(format!("{kind} chart needs at least one series")));
    }

    if let Some(x_values) = &options.x_values {
        if x_values.len() != dataset.len() {
            return Err(shape_error(format!(
                "{} x sequences for {} series",
                x_values.len(),
                dataset.len()
            )));
        }
        for (i, (xs, ys)) in x_values.iter().zip(dataset).enumerate() {
            if xs.len() != ys.len() {
                return Err(shape_error(format!(
                    "series {i} has {} x values but {} y values",
                    xs.len(),
                    ys.len()
                )));
            }
        }
    }

    match kind {
        ChartKind::StackedHistogram => {
            let len = dataset[0].len();
            if let Some(i) = dataset.iter().position(|layer| layer.len() != len) {
                return Err(shape_error(format!(
                    "stacked layers must have equal length: layer 0 has {len}, layer {i} has {}",
                    dataset[i].len()
                )));
            }
            if len % options.group_size != 0 {
                return Err(shape_error(format!(
                    "layer length {len} is not divisible by group size {}",
                    options.group_size
                )));
            }
        }
        ChartKind::Heatmap => {
            let n = dataset.len();
            if let Some(i) = dataset.iter().position(|row| row.len() != n) {
                return Err(shape_error(format!(
                    "heatmap matrix must be square: {n} rows but row {i} has {} columns",
                    dataset[i].len()
                )));
            }
        }
        ChartKind::Line if options.x_values.is_none() => {
            let len = dataset[0].len();
            if let Some(i) = dataset.iter().position(|ys| ys.len() > len) {
                return Err(shape_error(format!(
                    "series {i} has {} values but the shared index from series 0 has {len}",
                    dataset[i].len()
                )));
            }
        }
        ChartKind::Histogram | ChartKind::Line | ChartKind::Cdf | ChartKind::Scatter => {}
    }

    Ok(())
}
