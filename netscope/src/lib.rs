//! # netscope
//!
//! Turns the plain-text trace logs of a network simulator run into per-flow
//! and per-port charts.
//!
//! The work is split across three crates, re-exported here:
//!
//! - [`core`]: the simulator clock and logging bootstrap
//! - [`ingest`]: record parsing, key mapping, rolling windows and series
//! - [`viz`]: chart specifications and the six chart renderers
//!
//! This crate adds the batch driver: a TOML [`config::PipelineConfig`], and a
//! [`pipeline::Pipeline`] that discovers inputs, ingests each one and renders
//! every configured chart, isolating failures per file and per chart.
//!
//! ```no_run
//! use netscope::prelude::*;
//!
//! let config = PipelineConfig {
//!     inputs: vec!["traces/*.txt".to_string()],
//!     ..Default::default()
//! };
//! let (_, summary) = Pipeline::new(config)?.run()?;
//! println!("{} charts written", summary.charts_written);
//! # Ok::<(), netscope::error::PipelineError>(())
//! ```

pub use netscope_core as core;
pub use netscope_ingest as ingest;
pub use netscope_viz as viz;

pub mod config;
pub mod error;
pub mod pipeline;

pub mod prelude {
    //! Commonly used types

    pub use netscope_core::{init_logging, init_logging_with_level, SimTime};

    pub use netscope_ingest::{
        ingest_file, FlowTable, FlowTableVariant, IngestConfig, ParsePolicy, SeriesCategory, SeriesStore,
    };

    pub use netscope_viz::{
        render_to_path, ChartKind, ChartOptions, ChartSpec, ImageFormat, PaletteName, StyleResolver,
    };

    pub use crate::config::{ChartConfig, FlowTableConfig, PipelineConfig, RateCutoff};
    pub use crate::error::PipelineError;
    pub use crate::pipeline::{FileReport, Pipeline, RunSummary};
}
