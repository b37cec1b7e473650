//! Error types for the pipeline driver

use netscope_ingest::IngestError;
use netscope_viz::VizError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid glob pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No input files matched {0:?}")]
    NoInputs(Vec<String>),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Viz(#[from] VizError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
