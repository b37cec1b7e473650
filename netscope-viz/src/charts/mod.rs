//! Chart rendering
//!
//! Every [`ChartSpec`] is rendered through the same steps: acquire a drawing
//! area for the target, hand it to the layout matching the chart kind, and
//! present the result exactly once. The drawing area is owned by the calling
//! function, so it is released on every exit path.

pub mod axis;
pub mod cdf;
pub(crate) mod frame;
pub mod hatch;
pub mod heatmap;
pub mod histogram;
pub mod legend;
pub mod line;
pub(crate) mod marker;
pub mod scatter;
mod util;

use crate::error::VizError;
use crate::spec::{ChartKind, ChartSpec};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// Raster or vector output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    /// Format implied by a file extension; anything but `.svg` is a bitmap
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(VizError::InvalidConfiguration(format!(
                "unsupported image format {other:?}"
            ))),
        }
    }
}

/// Draw `spec` onto an already acquired drawing area and present it
pub fn render_on<DB: DrawingBackend>(spec: &ChartSpec, root: &DrawingArea<DB, Shift>) -> Result<(), VizError> {
    root.fill(&WHITE)
        .map_err(|e| VizError::RenderingError(format!("Failed to fill background: {e}")))?;

    match spec.kind() {
        ChartKind::Line => line::draw(root, spec)?,
        ChartKind::Cdf => cdf::draw(root, spec)?,
        ChartKind::Histogram => histogram::draw_grouped(root, spec)?,
        ChartKind::StackedHistogram => histogram::draw_stacked(root, spec)?,
        ChartKind::Scatter => scatter::draw(root, spec)?,
        ChartKind::Heatmap => heatmap::draw(root, spec)?,
    }

    root.present()
        .map_err(|e| VizError::ExportFailed(format!("Failed to save chart: {e}")))?;
    Ok(())
}

/// Render a chart to a file; `.svg` selects the vector backend
///
/// # Example
/// ```no_run
/// use netscope_viz::charts::render_to_path;
/// use netscope_viz::spec::{ChartKind, ChartOptions, ChartSpec};
///
/// let options = ChartOptions::new("Flow rate").x_label("Time (ms)");
/// let spec = ChartSpec::new(ChartKind::Line, vec![vec![1.0, 3.0, 2.0]], options).unwrap();
/// render_to_path(&spec, "flow_rate.png").unwrap();
/// ```
pub fn render_to_path(spec: &ChartSpec, output_path: impl AsRef<Path>) -> Result<(), VizError> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let size = (spec.options().width, spec.options().height);
    let rendered = match ImageFormat::from_path(output_path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            render_on(spec, &root)
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            render_on(spec, &root)
        }
    };
    // The backend is dropped by now; dropping it flushes whatever was drawn
    if let Err(e) = rendered {
        if output_path.exists() {
            let _ = std::fs::remove_file(output_path);
        }
        return Err(e);
    }

    debug!(path = %output_path.display(), kind = %spec.kind(), "Chart rendered");
    Ok(())
}

/// Render a chart into an RGB buffer of `width * height * 3` bytes
pub fn render_to_rgb(spec: &ChartSpec) -> Result<Vec<u8>, VizError> {
    let (width, height) = (spec.options().width, spec.options().height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        render_on(spec, &root)?;
    }
    Ok(buffer)
}

/// Render a chart into an SVG document
pub fn render_to_svg(spec: &ChartSpec) -> Result<String, VizError> {
    let mut document = String::new();
    {
        let size = (spec.options().width, spec.options().height);
        let root = SVGBackend::with_string(&mut document, size).into_drawing_area();
        render_on(spec, &root)?;
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.svg")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.SVG")), ImageFormat::Svg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a/b")), ImageFormat::Png);
        assert_eq!("SVG".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert!("gif".parse::<ImageFormat>().is_err());
    }
}
