//! Trace ingestion for network simulator logs
//!
//! This crate turns the plain-text trace stream written by a simulator run into
//! per-entity time series ready for plotting.
//!
//! # Pipeline
//!
//! - [`record`]: classify one line into a [`TraceRecord`] or discard it
//! - [`keymap`]: resolve flow keys and port numbers to series indices
//! - [`window`]: per-flow rolling averages over smoothed deviation samples
//! - [`series`]: the per-file [`SeriesStore`]
//! - [`ingest`]: the line loop tying the above together
//!
//! # Example
//!
//! ```
//! use netscope_ingest::{ingest_str, IngestConfig, RecordKind};
//!
//! let outcome = ingest_str("Port: 1000000000 3 55.2\n", &IngestConfig::default()).unwrap();
//! assert_eq!(outcome.store.series(RecordKind::Port)[3], vec![(1.0, 55.2)]);
//! ```

pub mod error;
pub mod ingest;
pub mod keymap;
pub mod record;
pub mod series;
pub mod window;

pub use error::IngestError;
pub use ingest::{ingest_file, ingest_reader, ingest_str, IngestConfig, IngestOutcome, IngestStats, Ingestor, ParsePolicy};
pub use keymap::{flow_key_for_node, FlowTable, FlowTableVariant, KeyMapper, MASKED_PORT, PORT_COUNT};
pub use record::{parse_record, ParseRecordError, RecordKind, TraceRecord};
pub use series::{Normalization, Series, SeriesCategory, SeriesStore};
pub use window::{RollingWindow, RollingWindowAggregator, DEFAULT_WINDOW_CAPACITY};
