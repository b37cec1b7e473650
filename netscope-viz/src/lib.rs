//! Chart rendering for netscope trace series
//!
//! A [`ChartSpec`] describes one chart: its kind, the dataset and every
//! rendering option. Specs are validated when they are built, so rendering
//! only fails on backend errors.
//!
//! # Chart kinds
//!
//! - **Line** and **Scatter**: one polyline or marker cloud per series
//! - **CDF**: empirical cumulative distribution of each series
//! - **Histogram**: grouped bars, one group per value index
//! - **StackedHistogram**: layered bars in clusters of `group_size`
//! - **Heatmap**: grayscale square matrix with a colorbar
//!
//! # Example
//!
//! ```no_run
//! use netscope_viz::{render_to_path, ChartKind, ChartOptions, ChartSpec};
//!
//! let options = ChartOptions::new("Port utilization")
//!     .x_label("Time (s)")
//!     .y_label("Utilization");
//! let spec = ChartSpec::from_points(
//!     ChartKind::Line,
//!     &[vec![(0.0, 0.2), (1.0, 0.4)], vec![(0.0, 0.7), (1.0, 0.6)]],
//!     options,
//! )
//! .unwrap();
//! render_to_path(&spec, "ports.svg").unwrap();
//! ```

pub mod charts;
pub mod error;
pub mod spec;
pub mod style;

pub use charts::{render_on, render_to_path, render_to_rgb, render_to_svg, ImageFormat};
pub use error::VizError;
pub use spec::{AxisScale, ChartKind, ChartOptions, ChartSpec, GridStyle, LegendLocation};
pub use style::{Hatch, LineStyle, Marker, PaletteName, SeriesStyle, StyleResolver};
