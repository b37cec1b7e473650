//! Error types for visualization

use thiserror::Error;

/// Errors related to chart construction and rendering
#[derive(Debug, Error)]
pub enum VizError {
    #[error("Invalid dataset shape: {0}")]
    InvalidDatasetShape(String),

    #[error("Unknown chart type: {0:?}")]
    UnknownChartType(String),

    #[error("Invalid plot configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Rendering error: {0}")]
    RenderingError(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
